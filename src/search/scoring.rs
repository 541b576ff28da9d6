//! Scoring functions for query evaluation

use crate::config::Bm25Params;

/// Inverse document frequency for a term found in `df` of `n` live
/// documents. Natural logarithm; always positive while `df >= 1`.
pub fn idf(n: f32, df: f32) -> f32 {
    (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
}

/// Saturated, length-normalized term frequency for one field.
///
/// `len` is the field's filtered token count for this document, `avg_len`
/// the running average of that field across live documents.
pub fn tf_norm(params: &Bm25Params, tf_raw: f32, len: f32, avg_len: f32) -> f32 {
    ((params.k1 + 1.0) * tf_raw)
        / (params.k1 * ((1.0 - params.b) + params.b * (len / avg_len)) + tf_raw)
}

/// Down-weight applied to a prefix expansion that extends the query term
/// by `extra_units` code units. An exact match scores at 1; longer
/// extensions decay toward zero.
pub fn expansion_boost(extra_units: usize) -> f32 {
    if extra_units == 0 {
        1.0
    } else {
        (1.0 + 1.0 / (1.0 + extra_units as f32)).ln()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idf_rarer_terms_score_higher() {
        let rare = idf(1000.0, 10.0);
        let common = idf(1000.0, 500.0);
        assert!(rare > common);
        assert!(common > 0.0);
    }

    #[test]
    fn test_idf_positive_even_when_term_is_everywhere() {
        assert!(idf(10.0, 10.0) > 0.0);
    }

    #[test]
    fn test_tf_norm_saturates() {
        let params = Bm25Params::default();
        let one = tf_norm(&params, 1.0, 10.0, 10.0);
        let five = tf_norm(&params, 5.0, 10.0, 10.0);
        let fifty = tf_norm(&params, 50.0, 10.0, 10.0);

        assert!(five > one);
        assert!(fifty > five);
        // saturation: the step from 5 to 50 is smaller than from 1 to 5
        assert!(fifty - five < five - one);
        assert!(fifty < params.k1 + 1.0);
    }

    #[test]
    fn test_tf_norm_penalizes_long_fields() {
        let params = Bm25Params::default();
        let short = tf_norm(&params, 2.0, 5.0, 10.0);
        let long = tf_norm(&params, 2.0, 40.0, 10.0);
        assert!(short > long);
    }

    #[test]
    fn test_tf_norm_ignores_length_when_b_is_zero() {
        let params = Bm25Params::new(1.2, 0.0);
        let short = tf_norm(&params, 2.0, 5.0, 10.0);
        let long = tf_norm(&params, 2.0, 40.0, 10.0);
        assert_eq!(short, long);
    }

    #[test]
    fn test_expansion_boost_exact_match_is_one() {
        assert_eq!(expansion_boost(0), 1.0);
    }

    #[test]
    fn test_expansion_boost_decays_with_extension_length() {
        let one = expansion_boost(1);
        let two = expansion_boost(2);
        let ten = expansion_boost(10);

        assert!(one < 1.0);
        assert!(two < one);
        assert!(ten < two);
        assert!(ten > 0.0);
    }
}
