//! Trace-driven sensor and selector control for replays and tests.
//!
//! A `TracePlayer` holds one step per tick. The sensor's `is_ready()` is the
//! first call of every station tick, so it advances the shared cursor; the
//! control then reads the same step.
use std::cell::RefCell;
use std::rc::Rc;

use stockbox_traits::{ControlInput, WeightSensor};

use crate::error::HwError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStep {
    /// `None` means the sensor is not ready on this tick.
    pub weight: Option<f32>,
    pub control: u16,
}

#[derive(Debug)]
struct Cursor {
    steps: Vec<TraceStep>,
    pos: Option<usize>,
}

impl Cursor {
    fn current(&self) -> Option<&TraceStep> {
        self.pos.and_then(|p| self.steps.get(p))
    }
}

#[derive(Debug, Clone)]
pub struct TracePlayer {
    cursor: Rc<RefCell<Cursor>>,
}

impl TracePlayer {
    pub fn new(steps: Vec<TraceStep>) -> Self {
        Self {
            cursor: Rc::new(RefCell::new(Cursor { steps, pos: None })),
        }
    }

    pub fn sensor(&self) -> SimulatedSensor {
        SimulatedSensor {
            cursor: self.cursor.clone(),
        }
    }

    pub fn control(&self) -> SimulatedControl {
        SimulatedControl {
            cursor: self.cursor.clone(),
        }
    }

    /// True once every step has been consumed.
    pub fn exhausted(&self) -> bool {
        let c = self.cursor.borrow();
        match c.pos {
            None => c.steps.is_empty(),
            Some(p) => p + 1 >= c.steps.len(),
        }
    }

    /// Index of the step the station is currently on.
    pub fn position(&self) -> Option<usize> {
        self.cursor.borrow().pos
    }
}

/// Simulated load cell; the trace already holds averaged weights, so the
/// requested sample count is ignored.
pub struct SimulatedSensor {
    cursor: Rc<RefCell<Cursor>>,
}

impl WeightSensor for SimulatedSensor {
    fn is_ready(&mut self) -> bool {
        let mut c = self.cursor.borrow_mut();
        let next = c.pos.map_or(0, |p| p + 1);
        if next >= c.steps.len() {
            return false;
        }
        c.pos = Some(next);
        c.steps[next].weight.is_some()
    }

    fn read_weight(
        &mut self,
        _samples: u8,
    ) -> Result<f32, Box<dyn std::error::Error + Send + Sync>> {
        let c = self.cursor.borrow();
        let w = c.current().and_then(|s| s.weight).ok_or(HwError::NotReady)?;
        tracing::trace!(weight = w, step = ?c.pos, "simulated weight");
        Ok(w)
    }
}

pub struct SimulatedControl {
    cursor: Rc<RefCell<Cursor>>,
}

impl ControlInput for SimulatedControl {
    fn read_raw(&mut self) -> Result<u16, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.cursor.borrow().current().map_or(0, |s| s.control))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(weight: Option<f32>, control: u16) -> TraceStep {
        TraceStep { weight, control }
    }

    #[test]
    fn sensor_and_control_share_the_cursor() {
        let player = TracePlayer::new(vec![step(Some(1.0), 10), step(None, 20), step(Some(3.0), 30)]);
        let mut sensor = player.sensor();
        let mut control = player.control();
        assert!(!player.exhausted());

        assert!(sensor.is_ready());
        assert_eq!(sensor.read_weight(5).unwrap(), 1.0);
        assert_eq!(control.read_raw().unwrap(), 10);

        assert!(!sensor.is_ready());
        assert!(sensor.read_weight(5).is_err());
        assert_eq!(control.read_raw().unwrap(), 20);

        assert!(sensor.is_ready());
        assert_eq!(sensor.read_weight(5).unwrap(), 3.0);
        assert!(player.exhausted());
        assert_eq!(player.position(), Some(2));

        // Past the end the sensor simply never becomes ready again.
        assert!(!sensor.is_ready());
        assert_eq!(player.position(), Some(2));
    }

    #[test]
    fn empty_trace_is_exhausted() {
        let player = TracePlayer::new(Vec::new());
        assert!(player.exhausted());
        assert!(!player.sensor().is_ready());
        assert_eq!(player.control().read_raw().unwrap(), 0);
    }
}
