//! Importance grade bands (§4.C): A ≥ 0.8, B ≥ 0.6, C ≥ 0.4, else D.

use memoria_core::config::DecayConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportanceGrade {
    A,
    B,
    C,
    D,
}

impl std::fmt::Display for ImportanceGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ImportanceGrade::A => "A",
            ImportanceGrade::B => "B",
            ImportanceGrade::C => "C",
            ImportanceGrade::D => "D",
        };
        write!(f, "{s}")
    }
}

pub fn classify(importance: f64, config: &DecayConfig) -> ImportanceGrade {
    if importance >= config.grade_a {
        ImportanceGrade::A
    } else if importance >= config.grade_b {
        ImportanceGrade::B
    } else if importance >= config.grade_c {
        ImportanceGrade::C
    } else {
        ImportanceGrade::D
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_match_thresholds() {
        let config = DecayConfig::default();
        assert_eq!(classify(0.9, &config), ImportanceGrade::A);
        assert_eq!(classify(0.8, &config), ImportanceGrade::A);
        assert_eq!(classify(0.7, &config), ImportanceGrade::B);
        assert_eq!(classify(0.5, &config), ImportanceGrade::C);
        assert_eq!(classify(0.1, &config), ImportanceGrade::D);
    }
}
