//! PoP code extraction and city lookup.

use crate::models::PopRecord;

/// Extract the PoP code from a range annotation.
///
/// The code is the second `.`-separated label:
/// `customer.sjc.pop.starlinkisp.net` -> `sjc`.
pub fn pop_code(annotation: &str) -> Option<&str> {
    annotation.split('.').nth(1).filter(|code| !code.is_empty())
}

/// Find the city for a PoP code.
pub fn pop_city<'a>(code: &str, pops: &'a [PopRecord]) -> Option<&'a str> {
    pops.iter()
        .find(|pop| pop.code == code)
        .map(|pop| pop.city.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_code() {
        assert_eq!(pop_code("customer.sjc.pop.starlinkisp.net"), Some("sjc"));
        assert_eq!(pop_code("pop1.sjc.starlinkisp.net"), Some("sjc"));
        assert_eq!(pop_code("localhost"), None);
        assert_eq!(pop_code("a..b"), None);
    }

    #[test]
    fn test_pop_city() {
        let pops = vec![
            PopRecord {
                code: "sjc".to_string(),
                city: "San Jose".to_string(),
            },
            PopRecord {
                code: "sea".to_string(),
                city: "Seattle".to_string(),
            },
        ];
        assert_eq!(pop_city("sea", &pops), Some("Seattle"));
        assert_eq!(pop_city("fra", &pops), None);
    }
}
