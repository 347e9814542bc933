//! Static catalog of common skin conditions served by `/common-conditions`.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Condition {
    pub id: &'static str,
    pub name: &'static str,
    pub symptoms: &'static [&'static str],
    pub short: &'static str,
}

pub const COMMON_CONDITIONS: &[Condition] = &[
    Condition {
        id: "acne",
        name: "Acne",
        symptoms: &["Pimples", "Blackheads", "Whiteheads", "Oily skin"],
        short: "Clogged hair follicles causing pimples, most common on the face, chest and back.",
    },
    Condition {
        id: "eczema",
        name: "Eczema (Atopic Dermatitis)",
        symptoms: &["Dry skin", "Itching", "Red or brownish patches", "Small raised bumps"],
        short: "Chronic inflammatory condition that makes skin dry, itchy and inflamed.",
    },
    Condition {
        id: "psoriasis",
        name: "Psoriasis",
        symptoms: &["Thick red patches", "Silvery scales", "Itching or burning", "Cracked dry skin"],
        short: "Autoimmune condition that speeds up skin cell turnover, producing scaly plaques.",
    },
    Condition {
        id: "rosacea",
        name: "Rosacea",
        symptoms: &["Facial redness", "Visible blood vessels", "Swollen red bumps", "Skin sensitivity"],
        short: "Chronic facial redness and flushing, often with small visible vessels.",
    },
    Condition {
        id: "contact-dermatitis",
        name: "Contact Dermatitis",
        symptoms: &["Red rash", "Itching", "Blisters", "Burning or stinging"],
        short: "Localized rash triggered by direct contact with an irritant or allergen.",
    },
    Condition {
        id: "seborrheic-dermatitis",
        name: "Seborrheic Dermatitis",
        symptoms: &["Flaky scales", "Greasy patches", "Redness", "Dandruff"],
        short: "Scaly, greasy patches in oil-rich areas like the scalp, face and chest.",
    },
    Condition {
        id: "tinea",
        name: "Fungal Infection (Tinea)",
        symptoms: &["Ring-shaped rash", "Scaly edges", "Itching", "Spreading patches"],
        short: "Fungal skin infection forming itchy, ring-shaped patches that spread outward.",
    },
    Condition {
        id: "urticaria",
        name: "Hives (Urticaria)",
        symptoms: &["Raised welts", "Intense itching", "Swelling", "Welts that move or fade quickly"],
        short: "Raised itchy welts that appear suddenly, often as an allergic reaction.",
    },
    Condition {
        id: "vitiligo",
        name: "Vitiligo",
        symptoms: &["White patches", "Premature graying of hair", "Loss of color inside the mouth"],
        short: "Loss of pigment producing well-defined white patches of skin.",
    },
    Condition {
        id: "shingles",
        name: "Shingles (Herpes Zoster)",
        symptoms: &["Painful blistering rash", "Burning or tingling", "One-sided band pattern", "Sensitivity to touch"],
        short: "Reactivated chickenpox virus causing a painful, blistering rash in a band.",
    },
];
