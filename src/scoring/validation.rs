use super::config::DimensionConfig;

/// Validate dimension configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_dimensions(config: &DimensionConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if config.scale.min >= config.scale.max {
        errors.push(format!(
            "dimensions.scale: min ({}) must be below max ({})",
            config.scale.min, config.scale.max
        ));
    }

    if config.value.is_empty() {
        errors.push("dimensions.value: at least one dimension is required".to_string());
    }

    if config.feasibility.is_empty() {
        errors.push("dimensions.feasibility: at least one dimension is required".to_string());
    }

    for (i, name) in config.inverted.iter().enumerate() {
        if !config.feasibility.contains(name) {
            errors.push(format!(
                "dimensions.inverted[{}]: '{}' is not a feasibility dimension",
                i, name
            ));
        }
    }

    // A dimension feeding both composites would double-count a single slider.
    for name in &config.value {
        if config.feasibility.contains(name) {
            errors.push(format!(
                "dimensions: '{}' appears in both the value and feasibility groups",
                name
            ));
        }
    }

    if let Some(threshold) = config.threshold {
        if threshold < config.scale.min || threshold > config.scale.max {
            errors.push(format!(
                "dimensions.threshold: {} is outside the scale [{}, {}]",
                threshold, config.scale.min, config.scale.max
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::config::Scale;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_dimensions(&DimensionConfig::default()).is_ok());
    }

    #[test]
    fn test_inverted_scale_bounds() {
        let config = DimensionConfig {
            scale: Scale { min: 5.0, max: 0.0 },
            ..Default::default()
        };
        let errors = validate_dimensions(&config).unwrap_err();
        assert!(errors[0].contains("dimensions.scale"));
    }

    #[test]
    fn test_empty_groups_rejected() {
        let config = DimensionConfig {
            value: vec![],
            feasibility: vec![],
            inverted: vec![],
            ..Default::default()
        };
        let errors = validate_dimensions(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("dimensions.value"));
        assert!(errors[1].contains("dimensions.feasibility"));
    }

    #[test]
    fn test_inverted_must_be_feasibility_dimension() {
        let config = DimensionConfig {
            inverted: vec!["economicImpact".to_string()],
            ..Default::default()
        };
        let errors = validate_dimensions(&config).unwrap_err();
        assert!(errors[0].contains("dimensions.inverted[0]"));
        assert!(errors[0].contains("economicImpact"));
    }

    #[test]
    fn test_dimension_in_both_groups_rejected() {
        let mut config = DimensionConfig::default();
        config.value.push("dataReadiness".to_string());
        let errors = validate_dimensions(&config).unwrap_err();
        assert!(errors[0].contains("both the value and feasibility groups"));
    }

    #[test]
    fn test_threshold_outside_scale() {
        let config = DimensionConfig {
            threshold: Some(7.0),
            ..Default::default()
        };
        let errors = validate_dimensions(&config).unwrap_err();
        assert!(errors[0].contains("dimensions.threshold"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = DimensionConfig {
            value: vec![],
            threshold: Some(-1.0),
            ..Default::default()
        };
        let errors = validate_dimensions(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
