use crate::domain::model::{ComplexityTier, DocumentComplexity};

pub const MODERATE_THRESHOLD: usize = 20;
pub const COMPLEX_THRESHOLD: usize = 50;

/// Each attached document counts as this many filled fields.
pub const DOCUMENT_WEIGHT: usize = 5;

pub fn classify_request(filled_fields: usize, documents: usize) -> ComplexityTier {
    let score = filled_fields + documents * DOCUMENT_WEIGHT;
    match score {
        s if s < MODERATE_THRESHOLD => ComplexityTier::Simple,
        s if s < COMPLEX_THRESHOLD => ComplexityTier::Moderate,
        _ => ComplexityTier::Complex,
    }
}

impl DocumentComplexity {
    pub fn from_pattern_count(count: usize) -> Self {
        match count {
            c if c < MODERATE_THRESHOLD => DocumentComplexity::Low,
            c if c < COMPLEX_THRESHOLD => DocumentComplexity::Medium,
            _ => DocumentComplexity::High,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_tiers_at_boundaries() {
        assert_eq!(classify_request(0, 0), ComplexityTier::Simple);
        assert_eq!(classify_request(19, 0), ComplexityTier::Simple);
        assert_eq!(classify_request(20, 0), ComplexityTier::Moderate);
        assert_eq!(classify_request(49, 0), ComplexityTier::Moderate);
        assert_eq!(classify_request(50, 0), ComplexityTier::Complex);
    }

    #[test]
    fn test_documents_raise_the_tier() {
        assert_eq!(classify_request(10, 2), ComplexityTier::Moderate);
        assert_eq!(classify_request(30, 4), ComplexityTier::Complex);
    }

    #[test]
    fn test_document_complexity() {
        assert_eq!(DocumentComplexity::from_pattern_count(3), DocumentComplexity::Low);
        assert_eq!(DocumentComplexity::from_pattern_count(20), DocumentComplexity::Medium);
        assert_eq!(DocumentComplexity::from_pattern_count(50), DocumentComplexity::High);
    }
}
