//! Capital/non-capital region classification from the business address.

use tracing::debug;

use crate::config::RegionKeywords;
use crate::models::{BusinessRegistration, RegionClassification, RegionType};

/// Classifies the business region.
///
/// An explicit `override_region` wins. Otherwise the keyword that occurs
/// earliest in the address decides (capital keywords win ties), matched
/// case-insensitively. A missing or unrecognized address defaults to
/// [`RegionType::Capital`] with `defaulted` set.
///
/// # Examples
///
/// ```
/// use subsidy_engine::calculation::classify_region;
/// use subsidy_engine::config::ConfigLoader;
/// use subsidy_engine::models::{BusinessRegistration, RegionType};
///
/// let loader = ConfigLoader::embedded().unwrap();
/// let keywords = &loader.config().policy().region;
///
/// let registration = BusinessRegistration {
///     address: Some("부산광역시 해운대구 센텀중앙로 79".to_string()),
///     ..Default::default()
/// };
/// let region = classify_region(Some(&registration), keywords, None);
/// assert_eq!(region.region, RegionType::NonCapital);
/// assert!(!region.defaulted);
///
/// let region = classify_region(None, keywords, None);
/// assert_eq!(region.region, RegionType::Capital);
/// assert!(region.defaulted);
/// ```
pub fn classify_region(
    registration: Option<&BusinessRegistration>,
    keywords: &RegionKeywords,
    override_region: Option<RegionType>,
) -> RegionClassification {
    if let Some(region) = override_region {
        return RegionClassification {
            region,
            matched_keyword: None,
            defaulted: false,
        };
    }

    let address = registration
        .and_then(|r| r.address.as_deref())
        .map(|a| a.trim().to_lowercase())
        .filter(|a| !a.is_empty());

    let Some(address) = address else {
        debug!("No business address; defaulting region to capital");
        return default_capital();
    };

    let capital = earliest(&address, &keywords.capital);
    let non_capital = earliest(&address, &keywords.non_capital);

    let hit = match (capital, non_capital) {
        (Some(c), Some(n)) if n.0 < c.0 => Some((RegionType::NonCapital, n.1)),
        (Some(c), _) => Some((RegionType::Capital, c.1)),
        (None, Some(n)) => Some((RegionType::NonCapital, n.1)),
        (None, None) => None,
    };

    match hit {
        Some((region, keyword)) => RegionClassification {
            region,
            matched_keyword: Some(keyword.to_string()),
            defaulted: false,
        },
        None => {
            debug!(address = %address, "Unrecognized business address; defaulting region to capital");
            default_capital()
        }
    }
}

fn earliest<'k>(address: &str, keywords: &'k [String]) -> Option<(usize, &'k str)> {
    keywords
        .iter()
        .filter_map(|k| {
            let position = address.find(&k.to_lowercase())?;
            Some((position, k.as_str()))
        })
        .min_by_key(|(position, _)| *position)
}

fn default_capital() -> RegionClassification {
    RegionClassification {
        region: RegionType::Capital,
        matched_keyword: None,
        defaulted: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;

    fn keywords() -> RegionKeywords {
        ConfigLoader::embedded()
            .unwrap()
            .config()
            .policy()
            .region
            .clone()
    }

    fn at(address: &str) -> RegionClassification {
        let registration = BusinessRegistration {
            address: Some(address.to_string()),
            ..Default::default()
        };
        classify_region(Some(&registration), &keywords(), None)
    }

    #[test]
    fn test_capital_addresses() {
        assert_eq!(at("서울특별시 강남구 테헤란로 1").region, RegionType::Capital);
        assert_eq!(at("경기도 성남시 분당구").region, RegionType::Capital);
        assert_eq!(at("인천광역시 연수구").matched_keyword.as_deref(), Some("인천"));
        assert_eq!(at("123 Teheran-ro, Seoul").region, RegionType::Capital);
    }

    #[test]
    fn test_non_capital_addresses() {
        assert_eq!(at("대전광역시 유성구").region, RegionType::NonCapital);
        assert_eq!(at("제주특별자치도 제주시").region, RegionType::NonCapital);
        assert_eq!(at("Haeundae-gu, BUSAN").region, RegionType::NonCapital);
    }

    #[test]
    fn test_earliest_keyword_wins() {
        // Province first, street name containing a capital keyword later.
        let region = at("대구광역시 중구 서울로 12");
        assert_eq!(region.region, RegionType::NonCapital);
        assert_eq!(region.matched_keyword.as_deref(), Some("대구"));
    }

    #[test]
    fn test_unrecognized_address_defaults_to_capital() {
        let region = at("Somewhere 123");
        assert_eq!(region.region, RegionType::Capital);
        assert!(region.defaulted);

        let region = at("   ");
        assert!(region.defaulted);
    }

    #[test]
    fn test_override_wins() {
        let registration = BusinessRegistration {
            address: Some("서울특별시 중구".to_string()),
            ..Default::default()
        };
        let region = classify_region(
            Some(&registration),
            &keywords(),
            Some(RegionType::NonCapital),
        );
        assert_eq!(region.region, RegionType::NonCapital);
        assert!(!region.defaulted);
    }
}
