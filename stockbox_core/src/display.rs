//! Two-line operator screens.

/// Character columns on the operator display.
pub const DISPLAY_COLS: usize = 16;

/// Human weight text: whole grams below 1 kg, kilograms with two decimals
/// from there.
pub fn format_weight(weight: f32) -> String {
    if weight < 1000.0 {
        format!("{weight:.0} g")
    } else {
        format!("{:.2} kg", weight / 1000.0)
    }
}

/// Truncate to the display width.
pub fn fit(line: &str) -> String {
    line.chars().take(DISPLAY_COLS).collect()
}

/// Everything the station ever shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    Ready { product: Option<&'a str> },
    Weighing { weight: f32 },
    Candidate { product: &'a str },
    Selected { product: &'a str },
    Reported { product: &'a str, weight: f32 },
    SendFailed { weight: f32 },
    NoProduct { weight: f32 },
    CatalogUnavailable,
}

impl Screen<'_> {
    pub fn lines(&self) -> (String, String) {
        let (a, b) = match self {
            Screen::Ready { product } => (
                "Ready to weigh".to_string(),
                product.unwrap_or("No product").to_string(),
            ),
            Screen::Weighing { weight } => ("Weighing...".to_string(), format_weight(*weight)),
            Screen::Candidate { product } => ("Select product".to_string(), (*product).to_string()),
            Screen::Selected { product } => ("Product set".to_string(), (*product).to_string()),
            Screen::Reported { product, weight } => {
                ((*product).to_string(), format!("Sent {}", format_weight(*weight)))
            }
            Screen::SendFailed { weight } => {
                ("Send failed".to_string(), format_weight(*weight))
            }
            Screen::NoProduct { weight } => ("No product".to_string(), format_weight(*weight)),
            Screen::CatalogUnavailable => ("Catalog empty".to_string(), "Check network".to_string()),
        };
        (fit(&a), fit(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_units_switch_at_one_kilogram() {
        assert_eq!(format_weight(51.4), "51 g");
        assert_eq!(format_weight(999.0), "999 g");
        assert_eq!(format_weight(1000.0), "1.00 kg");
        assert_eq!(format_weight(1234.0), "1.23 kg");
    }

    #[test]
    fn long_designations_are_truncated() {
        let (a, b) = Screen::Selected {
            product: "Yaourt nature brasse 4x125g",
        }
        .lines();
        assert_eq!(a, "Product set");
        assert_eq!(b.chars().count(), DISPLAY_COLS);
    }
}
