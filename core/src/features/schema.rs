use serde::Serialize;

/// Widget contract for one numeric input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub precision: usize,
    pub integer: bool,
}

impl FieldSpec {
    const fn decimal(
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        precision: usize,
    ) -> Self {
        Self {
            name,
            label,
            min,
            max,
            step,
            precision,
            integer: false,
        }
    }

    const fn whole(name: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            label,
            min,
            max,
            step: 1.0,
            precision: 0,
            integer: true,
        }
    }

    /// Value shown by an untouched widget.
    pub fn default_value(&self) -> f64 {
        self.min
    }

    /// Clamps into `[min, max]` and rounds to the display precision.
    pub fn clamp(&self, value: f64) -> f64 {
        let bounded = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };
        let factor = 10f64.powi(self.precision as i32);
        ((bounded * factor).round() / factor).clamp(self.min, self.max)
    }

    /// Formats a value with the widget's display precision.
    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.precision, value)
    }
}

pub const FEATURE_COUNT: usize = 11;

/// Field specs in classifier input order.
pub static FIELD_SPECS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec::decimal("fixed_acidity", "Fixed Acidity", 0.0, 20.0, 0.1, 1),
    FieldSpec::decimal("volatile_acidity", "Volatile Acidity", 0.0, 2.0, 0.01, 2),
    FieldSpec::decimal("citric_acid", "Citric Acid", 0.0, 1.0, 0.01, 2),
    FieldSpec::decimal("residual_sugar", "Residual Sugar", 0.0, 20.0, 0.1, 1),
    FieldSpec::decimal("chlorides", "Chlorides", 0.0, 1.0, 0.001, 3),
    FieldSpec::whole("free_sulfur_dioxide", "Free Sulfur Dioxide", 0.0, 200.0),
    FieldSpec::whole("total_sulfur_dioxide", "Total Sulfur Dioxide", 0.0, 200.0),
    FieldSpec::decimal("density", "Density", 0.99, 1.0032, 0.00001, 5),
    FieldSpec::decimal("ph", "pH", 2.0, 4.0, 0.01, 2),
    FieldSpec::decimal("sulphates", "Sulphates", 0.0, 2.0, 0.01, 2),
    FieldSpec::decimal("alcohol", "Alcohol", 8.0, 15.0, 0.1, 1),
];

/// Column names in the order the classifier expects them.
pub fn feature_names() -> [&'static str; FEATURE_COUNT] {
    FIELD_SPECS.map(|spec| spec.name)
}

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELD_SPECS.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_and_rounds() {
        let chlorides = field_spec("chlorides").unwrap();
        assert_eq!(chlorides.clamp(1.7), 1.0);
        assert_eq!(chlorides.clamp(-0.2), 0.0);
        assert_eq!(chlorides.clamp(0.07649), 0.076);

        let free_so2 = field_spec("free_sulfur_dioxide").unwrap();
        assert_eq!(free_so2.clamp(11.6), 12.0);
        assert_eq!(free_so2.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn density_keeps_five_decimals() {
        let density = field_spec("density").unwrap();
        assert_eq!(density.format(density.clamp(0.997834)), "0.99783");
        assert_eq!(density.clamp(0.5), 0.99);
    }

    #[test]
    fn names_follow_classifier_order() {
        let names = feature_names();
        assert_eq!(names[0], "fixed_acidity");
        assert_eq!(names[8], "ph");
        assert_eq!(names[FEATURE_COUNT - 1], "alcohol");
    }

    #[test]
    fn every_default_lies_in_range() {
        for spec in FIELD_SPECS.iter() {
            assert_eq!(spec.clamp(spec.default_value()), spec.default_value(), "{}", spec.name);
            assert!(spec.step > 0.0);
        }
    }
}
