//! Unit tests for the design model
//!
//! Slider bounds are checked with proptest: no setter input, however wild,
//! may leave a value outside its range or off its step.

use archvision::design::*;
use proptest::prelude::*;

mod template_tests {
    use super::*;

    #[test]
    fn test_every_style_has_a_template() {
        assert_eq!(HOME_STYLES.len(), HomeStyle::ALL.len());
        for style in HomeStyle::ALL {
            assert_eq!(style.template().style, style);
            assert!(!style.template().description.is_empty());
        }
    }

    #[test]
    fn test_template_keeps_default_parameters() {
        let config = DesignConfig::from_template(HomeStyle::Modern);
        let default = DesignConfig::default();
        assert_eq!(config.style(), HomeStyle::Modern);
        assert_eq!(config.bedrooms(), default.bedrooms());
        assert_eq!(config.features(), default.features());
        assert!(!config.has_custom_instructions());
    }

    #[test]
    fn test_style_parsing_accepts_label_slug_and_number() {
        assert_eq!("Luxury Villa".parse::<HomeStyle>(), Ok(HomeStyle::Luxury));
        assert_eq!("eco".parse::<HomeStyle>(), Ok(HomeStyle::Eco));
        assert_eq!("1".parse::<HomeStyle>(), Ok(HomeStyle::ALL[0]));
        assert!("gothic".parse::<HomeStyle>().is_err());
        assert!("0".parse::<HomeStyle>().is_err());
    }
}

mod feature_tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_the_set() {
        let mut config = DesignConfig::default();
        let before = config.features().to_vec();
        assert_eq!(config.toggle_feature("wine cellar"), Some(true));
        assert!(config.has_feature("Wine Cellar"));
        assert_eq!(config.toggle_feature("Wine Cellar"), Some(false));
        assert_eq!(config.features(), before.as_slice());
    }

    #[test]
    fn test_unknown_feature_is_ignored() {
        let mut config = DesignConfig::default();
        assert_eq!(config.toggle_feature("Moat"), None);
        assert_eq!(config.features().len(), 3);
    }

    #[test]
    fn test_features_stay_in_catalog() {
        let mut config = DesignConfig::default();
        config.clear_features();
        for f in AVAILABLE_FEATURES {
            config.toggle_feature(f);
        }
        assert_eq!(config.features().len(), AVAILABLE_FEATURES.len());
        assert!(config
            .features()
            .iter()
            .all(|f| AVAILABLE_FEATURES.contains(&f.as_str())));
    }

    #[test]
    fn test_blank_instructions_do_not_count() {
        let mut config = DesignConfig::default();
        config.set_custom_instructions("  \n ");
        assert!(!config.has_custom_instructions());
        config.set_custom_instructions("copper cladding");
        assert!(config.has_custom_instructions());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_bedrooms_in_range(n in any::<i64>()) {
        let mut config = DesignConfig::default();
        config.set_bedrooms(n);
        prop_assert!((BEDROOMS_MIN..=BEDROOMS_MAX).contains(&config.bedrooms()));
    }

    #[test]
    fn prop_levels_in_range(n in any::<i64>()) {
        let mut config = DesignConfig::default();
        config.set_levels(n);
        prop_assert!((LEVELS_MIN..=LEVELS_MAX).contains(&config.levels()));
    }

    #[test]
    fn prop_bathrooms_on_half_steps(x in any::<f64>()) {
        let mut config = DesignConfig::default();
        config.set_bathrooms(x);
        let b = config.bathrooms();
        prop_assert!((BATHROOMS_MIN..=BATHROOMS_MAX).contains(&b));
        prop_assert_eq!((b * 2.0).fract(), 0.0);
    }

    #[test]
    fn prop_lot_size_on_steps(n in any::<i64>()) {
        let mut config = DesignConfig::default();
        config.set_lot_size(n);
        let lot = config.lot_size();
        prop_assert!((LOT_SIZE_MIN..=LOT_SIZE_MAX).contains(&lot));
        prop_assert_eq!(lot % LOT_SIZE_STEP, 0);
    }
}
