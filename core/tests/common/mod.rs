#![allow(dead_code)]

use symptom_core::DiseaseRecord;

pub fn record(name: &str, primary: &str, locations: &str) -> DiseaseRecord {
    DiseaseRecord {
        name: name.to_string(),
        primary_symptoms: primary.to_string(),
        common_locations: locations.to_string(),
        ..Default::default()
    }
}

pub fn skin_conditions() -> Vec<DiseaseRecord> {
    vec![
        DiseaseRecord {
            name: "Acne vulgaris".into(),
            primary_symptoms: "pimple whitehead blackhead oily skin".into(),
            secondary_symptoms: "pain redness".into(),
            common_locations: "face chest back".into(),
            cause: "blocked pores".into(),
            treatment: "wash twice daily, benzoyl peroxide".into(),
            related_herbs: vec!["Turmeric".into(), "Green tea".into()],
            ..Default::default()
        },
        DiseaseRecord {
            name: "Atopic eczema".into(),
            primary_symptoms: "dry itchy patches".into(),
            secondary_symptoms: "cracked skin".into(),
            common_locations: "elbow knee neck".into(),
            treatment: "moisturize, avoid triggers".into(),
            related_herbs: vec!["Aloe vera".into(), "Coconut oil".into()],
            ..Default::default()
        },
        DiseaseRecord {
            name: "Tinea corporis".into(),
            primary_symptoms: "ring shaped rash scaly border itch".into(),
            common_locations: "arms legs groin".into(),
            treatment: "antifungal cream".into(),
            related_herbs: vec!["Garlic".into()],
            ..Default::default()
        },
        DiseaseRecord {
            name: "Shingles".into(),
            primary_symptoms: "painful blisters band rash".into(),
            secondary_symptoms: "tingling".into(),
            common_locations: "chest back".into(),
            treatment: "antiviral medicine, rest, reduce fever".into(),
            ..Default::default()
        },
        DiseaseRecord {
            name: "Hand foot mouth disease".into(),
            primary_symptoms: "small blisters sores".into(),
            secondary_symptoms: "fever".into(),
            common_locations: "hand foot mouth".into(),
            treatment: "fluids, fever control".into(),
            ..Default::default()
        },
        DiseaseRecord {
            name: "Urticaria".into(),
            primary_symptoms: "raised welts hives itch".into(),
            secondary_symptoms: "swelling lips".into(),
            common_locations: "whole body".into(),
            treatment: "antihistamine".into(),
            ..Default::default()
        },
    ]
}
