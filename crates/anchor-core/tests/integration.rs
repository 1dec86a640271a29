//! Integration tests exercising the full pipeline:
//! intention → distill → generate (all variants) → rasterize → structure match.

use anchor_core::geometry::bounds;
use anchor_core::{
    ALL_VARIANTS, Classification, FRAME, RasterConfig, SigilVariant, StructureMatchConfig,
    distill, export_json, generate_all_variants, generate_variant, is_vowel, needs_regeneration,
    prepare_line_art, structure_match,
};
use proptest::prelude::*;

const INTENTIONS: &[&str] = &[
    "Stay focused during training",
    "I am calm and present",
    "Finish the marathon strong",
    "Speak with confidence at work",
    "Sleep deeply every night",
];

#[test]
fn intention_to_three_sigils() {
    for text in INTENTIONS {
        let distilled = distill(text);
        assert!(!distilled.final_letters.is_empty(), "{text}");

        let results = generate_all_variants(distilled.final_letters.as_slice());
        assert_eq!(results.len(), 3);
        for (result, variant) in results.iter().zip(ALL_VARIANTS) {
            assert_eq!(result.variant, variant);
            assert_eq!(result.source_letters, distilled.final_letters);
            assert!(!result.metadata.normalized_input);
            assert!(result.svg.starts_with("<svg"));
        }
    }
}

#[test]
fn all_variants_share_the_frame() {
    let letters = distill("Speak with confidence at work").final_letters;
    for result in generate_all_variants(letters.as_slice()) {
        let (lo, hi) = bounds(&result.strokes()).expect("non-empty geometry");
        let margin = result.metadata.stroke_width / 2.0;
        assert!(lo.x - margin >= 0.0 && lo.y - margin >= 0.0);
        assert!(hi.x + margin <= FRAME && hi.y + margin <= FRAME);
        assert!(result.svg.contains(r#"viewBox="0 0 100 100""#));
    }
}

#[test]
fn anchor_dense_fuller_than_minimal() {
    let letters: Vec<char> = "ANCHOR".chars().filter(|c| !is_vowel(*c)).collect();
    let dense = generate_variant(&letters, SigilVariant::Dense);
    let minimal = generate_variant(&letters, SigilVariant::Minimal);
    assert_eq!(dense.metadata.stroke_count, 6);
    assert_eq!(minimal.metadata.stroke_count, 3);
    assert_eq!(dense.metadata.view_box, minimal.metadata.view_box);

    let config = RasterConfig::default();
    assert!(dense.rasterize(&config).count() > minimal.rasterize(&config).count());
}

#[test]
fn empty_distillation_still_renders() {
    let distilled = distill("AEIOU!!");
    assert!(distilled.final_letters.is_empty());
    for result in generate_all_variants(distilled.final_letters.as_slice()) {
        assert!(result.metadata.placeholder);
        assert!(!result.rasterize(&RasterConfig::default()).is_empty());
    }
}

#[test]
fn variant_compared_with_itself_is_preserved() {
    let letters = distill("Finish the marathon strong").final_letters;
    let raster = RasterConfig::default();
    let config = StructureMatchConfig::default();

    let results = generate_all_variants(letters.as_slice());
    let masks: Vec<_> = results.iter().map(|r| r.rasterize(&raster)).collect();
    let scores: Vec<_> = masks
        .iter()
        .map(|m| structure_match(&masks[0], m, &config))
        .collect();

    assert_eq!(scores[0].classification, Classification::Preserved);
    assert!(scores[1].combined < scores[0].combined);
    let (regen, passing) = needs_regeneration(&scores, 1);
    assert!(!regen);
    assert!(passing.contains(&0));
}

#[test]
fn prepared_svg_keeps_path_data() {
    let result = generate_variant(&['N', 'C', 'H', 'R'], SigilVariant::Balanced);
    let prepared = prepare_line_art(&result.svg, "#FFFFFF");
    let d_attr = |s: &str| {
        let start = s.find(" d=\"").unwrap() + 4;
        let end = s[start..].find('"').unwrap() + start;
        s[start..end].to_string()
    };
    assert_eq!(d_attr(&prepared), d_attr(&result.svg));
    assert!(!prepared.contains("currentColor"));
}

#[test]
fn export_json_lists_all_variants() {
    let results = generate_all_variants(&['F', 'C', 'S']);
    let json = export_json(&results).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let variants: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["variant"].as_str().unwrap())
        .collect();
    assert_eq!(variants, vec!["balanced", "dense", "minimal"]);
}

proptest! {
    #[test]
    fn distill_is_deterministic(s in ".{0,100}") {
        prop_assert_eq!(distill(&s), distill(&s));
    }

    #[test]
    fn distill_never_keeps_vowels_or_repeats(s in "[ -~]{0,100}") {
        let letters = distill(&s).final_letters;
        let mut seen = std::collections::HashSet::new();
        for c in letters.iter() {
            prop_assert!(!is_vowel(*c));
            prop_assert!(c.is_ascii_uppercase());
            prop_assert!(seen.insert(*c), "duplicate {}", c);
        }
    }

    #[test]
    fn distill_preserves_first_occurrence_order(s in "[a-zA-Z ,.!]{0,100}") {
        let mut expected = Vec::new();
        for c in s.chars().filter(|c| c.is_ascii_alphabetic() && !is_vowel(*c)) {
            let upper = c.to_ascii_uppercase();
            if !expected.contains(&upper) {
                expected.push(upper);
            }
        }
        let distilled = distill(&s);
        prop_assert_eq!(distilled.final_letters.as_slice(), expected.as_slice());
    }

    #[test]
    fn distill_ignores_case(s in "[a-zA-Z ]{0,60}") {
        prop_assert_eq!(
            distill(&s.to_ascii_lowercase()).final_letters,
            distill(&s.to_ascii_uppercase()).final_letters
        );
    }

    #[test]
    fn generation_is_deterministic(letters in proptest::collection::vec(any::<char>(), 0..20)) {
        for variant in ALL_VARIANTS {
            let a = generate_variant(&letters, variant);
            let b = generate_variant(&letters, variant);
            prop_assert_eq!(a.svg, b.svg);
        }
    }

    #[test]
    fn always_three_variants(letters in proptest::collection::vec(any::<char>(), 0..12)) {
        let results = generate_all_variants(&letters);
        prop_assert_eq!(results.len(), 3);
        for r in &results {
            prop_assert!(r.svg.contains("<path d=\"M "));
        }
    }
}
