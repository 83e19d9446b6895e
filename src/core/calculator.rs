use crate::core::catalog::{find_service, service};
use crate::domain::model::{Quote, Service, ServiceId};

/// Parses the free-text area field.
///
/// Blank text, anything that is not a plain decimal number, negative values and
/// non-finite values (`inf`, `NaN`) all yield `None`.
pub fn parse_area(area_text: &str) -> Option<f64> {
    let trimmed = area_text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let area: f64 = trimmed.parse().ok()?;
    (area.is_finite() && area >= 0.0).then_some(area)
}

pub fn quote_for(service: &Service, area: f64) -> Option<Quote> {
    let amount = f64::from(service.base_price) + f64::from(service.price_per_unit) * area;
    amount.is_finite().then_some(Quote {
        service: service.id,
        area,
        amount,
    })
}

/// `base_price + price_per_unit * area` for a catalog id and raw area text.
pub fn compute_quote(service_id: &str, area_text: &str) -> Option<Quote> {
    let service = find_service(service_id)?;
    let area = parse_area(area_text)?;
    quote_for(service, area)
}

/// Calculator card state: current selection, area input and the quote on display.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    service: Option<ServiceId>,
    area: String,
    last_quote: Option<Quote>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_service(&mut self, id: ServiceId) {
        self.service = Some(id);
    }

    pub fn set_area(&mut self, area_text: impl Into<String>) {
        self.area = area_text.into();
    }

    pub fn selected_service(&self) -> Option<ServiceId> {
        self.service
    }

    pub fn area_text(&self) -> &str {
        &self.area
    }

    /// Recomputes the quote. A failed computation leaves the previous quote displayed.
    pub fn calculate(&mut self) -> Option<Quote> {
        let quote = self
            .service
            .and_then(|id| parse_area(&self.area).and_then(|area| quote_for(service(id), area)));

        match quote {
            Some(quote) => {
                tracing::debug!(
                    service = %quote.service,
                    area = quote.area,
                    amount = quote.amount,
                    "quote computed"
                );
                self.last_quote = Some(quote);
            }
            None => tracing::debug!(area = %self.area, "no quote for current input"),
        }

        quote
    }

    pub fn displayed_quote(&self) -> Option<Quote> {
        self.last_quote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consultation_ignores_area() {
        for area in ["0", "1", "37.5", "1000", "250000"] {
            let quote = compute_quote("consultation", area).unwrap();
            assert_eq!(quote.amount, 5000.0, "area {}", area);
        }
    }

    #[test]
    fn test_land_plot_hundred_metres() {
        let quote = compute_quote("land-plot", "100").unwrap();
        assert_eq!(quote.amount, 45000.0);
        assert_eq!(quote.service, ServiceId::LandPlot);
    }

    #[test]
    fn test_tech_plan_fifty_metres() {
        assert_eq!(compute_quote("tech-plan", "50").unwrap().amount, 45000.0);
    }

    #[test]
    fn test_document_fractional_area() {
        assert_eq!(compute_quote("document", "12.5").unwrap().amount, 14500.0);
    }

    #[test]
    fn test_unknown_service_has_no_quote() {
        assert!(compute_quote("topography", "10").is_none());
        assert!(compute_quote("", "10").is_none());
    }

    #[test]
    fn test_empty_area_has_no_quote() {
        assert!(compute_quote("document", "").is_none());
        assert!(compute_quote("document", "   ").is_none());
    }

    #[test]
    fn test_parse_area_edge_cases() {
        assert_eq!(parse_area(" 42 "), Some(42.0));
        assert_eq!(parse_area("1e3"), Some(1000.0));
        assert_eq!(parse_area("0"), Some(0.0));
        assert_eq!(parse_area("abc"), None);
        assert_eq!(parse_area("12,5"), None);
        assert_eq!(parse_area("-5"), None);
        assert_eq!(parse_area("NaN"), None);
        assert_eq!(parse_area("inf"), None);
    }

    #[test]
    fn test_zero_area_is_base_price() {
        assert_eq!(compute_quote("land-plot", "0").unwrap().amount, 15000.0);
    }

    #[test]
    fn test_overflowing_area_has_no_quote() {
        assert!(compute_quote("tech-plan", "1e308").is_none());
        assert!(compute_quote("land-plot", "1e12").is_some());
    }

    #[test]
    fn test_calculator_keeps_stale_quote() {
        let mut calculator = Calculator::new();
        assert!(calculator.calculate().is_none());
        assert!(calculator.displayed_quote().is_none());

        calculator.select_service(ServiceId::LandPlot);
        calculator.set_area("100");
        assert_eq!(calculator.calculate().unwrap().amount, 45000.0);

        calculator.set_area("not a number");
        assert!(calculator.calculate().is_none());
        assert_eq!(calculator.displayed_quote().unwrap().amount, 45000.0);

        calculator.select_service(ServiceId::Consultation);
        calculator.set_area("10");
        assert_eq!(calculator.calculate().unwrap().amount, 5000.0);
        assert_eq!(calculator.displayed_quote().unwrap().service, ServiceId::Consultation);
    }
}
