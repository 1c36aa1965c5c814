//! Wire shape of a report as the remote database expects it.

use serde::Serialize;
use stockbox_traits::ReportEvent;

#[derive(Debug, Serialize)]
pub struct ReportPayload<'a> {
    pub poids: f64,
    pub date: &'a str,
    pub zone_prod: &'a str,
    pub prod_sortie: &'a str,
}

impl<'a> ReportPayload<'a> {
    pub fn new(event: &'a ReportEvent, zone: &'a str) -> Self {
        Self {
            // two decimals
            poids: (f64::from(event.weight) * 100.0).round() / 100.0,
            date: &event.timestamp,
            zone_prod: zone,
            prod_sortie: &event.product_designation,
        }
    }

    pub fn to_json(&self) -> String {
        // Serializing a struct of plain fields cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_wire_field_names() {
        let ev = ReportEvent {
            weight: 51.256,
            product_designation: "Yaourt Socolait".into(),
            timestamp: "2026-10-18 09:15:00".into(),
        };
        let v: serde_json::Value =
            serde_json::from_str(&ReportPayload::new(&ev, "TWF").to_json()).unwrap();
        assert_eq!(v["poids"], 51.26);
        assert_eq!(v["date"], "2026-10-18 09:15:00");
        assert_eq!(v["zone_prod"], "TWF");
        assert_eq!(v["prod_sortie"], "Yaourt Socolait");
        assert_eq!(v.as_object().map(|o| o.len()), Some(4));
    }
}
