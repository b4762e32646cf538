#![deny(unsafe_code)]

//! Built-in neonatal sepsis intake schema.
//!
//! Fields are grouped as on the assessment form: antenatal and peripartum
//! risk factors, neonatal constitution, early postnatal signs, and the
//! haematological scoring system (HSS). Synonyms are listed in priority
//! order; the first one present in a record wins.

use crate::schema::ValueClass::{BooleanLike, CategoricalSource, FreeText, Numeric};
use crate::schema::{
    BandLimit, CanonicalField, CanonicalSchema, CategoryBand, DerivedCategory, ValueClass,
};

pub const BUILTIN_SCHEMA_NAME: &str = "neonatal-sepsis-intake";
pub const BUILTIN_SCHEMA_VERSION: &str = "1.0.0";

struct FieldDef {
    name: &'static str,
    class: ValueClass,
    synonyms: &'static [&'static str],
    derived: Option<&'static DerivedDef>,
}

struct DerivedDef {
    target: &'static str,
    bands: &'static [(BandLimit, &'static str)],
}

const BIRTH_WEIGHT_CATEGORY: DerivedDef = DerivedDef {
    target: "birth_weight_category",
    bands: &[
        (BandLimit::Below(1500.0), "<1500 g"),
        (BandLimit::Below(2500.0), "1500–2499 g"),
        (BandLimit::Unbounded, "≥2500 g"),
    ],
};

const GESTATIONAL_AGE_CATEGORY: DerivedDef = DerivedDef {
    target: "gestational_age_category",
    bands: &[
        (BandLimit::Below(34.0), "<34 weeks"),
        (BandLimit::AtMost(36.0), "34–36 weeks"),
        (BandLimit::Unbounded, "≥37 weeks"),
    ],
};

const fn field(
    name: &'static str,
    class: ValueClass,
    synonyms: &'static [&'static str],
) -> FieldDef {
    FieldDef {
        name,
        class,
        synonyms,
        derived: None,
    }
}

const BUILTIN_FIELDS: &[FieldDef] = &[
    // Antenatal and peripartum
    field(
        "prom_present",
        BooleanLike,
        &["prom_present", "prom", "rupture_of_membranes", "rom_present"],
    ),
    field(
        "prom_duration_hours",
        Numeric,
        &["prom_duration_hours", "prom_duration", "rom_duration", "rupture_duration"],
    ),
    field(
        "maternal_fever_celsius",
        Numeric,
        &["maternal_fever_celsius", "maternal_fever", "mother_fever", "fever_temp"],
    ),
    field(
        "chorioamnionitis",
        BooleanLike,
        &["chorioamnionitis", "chorio", "amnionitis"],
    ),
    field(
        "foul_smelling_liquor",
        BooleanLike,
        &["foul_smelling_liquor", "foul_liquor", "bad_smell_liquor"],
    ),
    field(
        "prolonged_labor",
        BooleanLike,
        &["prolonged_labor", "long_labor", "extended_labor"],
    ),
    field(
        "pv_examinations_count",
        Numeric,
        &["pv_examinations_count", "pv_count", "vaginal_exam_count", "pv_exams"],
    ),
    field(
        "unbooked_pregnancy",
        BooleanLike,
        &["unbooked_pregnancy", "unbooked", "no_anc"],
    ),
    field(
        "maternal_uti_sti",
        BooleanLike,
        &["maternal_uti_sti", "uti", "sti", "maternal_infection"],
    ),
    field(
        "meconium_stained_liquor",
        BooleanLike,
        &["meconium_stained_liquor", "meconium", "stained_liquor"],
    ),
    field(
        "cotwin_iud",
        BooleanLike,
        &["cotwin_iud", "twin_death", "cotwin_death"],
    ),
    // Neonatal constitution
    FieldDef {
        name: "birth_weight_grams",
        class: CategoricalSource,
        synonyms: &["birth_weight", "weight", "birth_weight_grams", "bw"],
        derived: Some(&BIRTH_WEIGHT_CATEGORY),
    },
    FieldDef {
        name: "gestational_age_weeks",
        class: CategoricalSource,
        synonyms: &["gestational_age", "ga", "gestational_age_weeks", "gestation"],
        derived: Some(&GESTATIONAL_AGE_CATEGORY),
    },
    field(
        "apgar_1_min",
        Numeric,
        &["apgar_1_min", "apgar1", "apgar_1", "apgar_one_min"],
    ),
    field(
        "apgar_5_min",
        Numeric,
        &["apgar_5_min", "apgar5", "apgar_5", "apgar_five_min"],
    ),
    field(
        "resuscitation_required",
        BooleanLike,
        &["resuscitation_required", "resuscitation", "resus_required"],
    ),
    field(
        "neonatal_sex",
        FreeText,
        &["neonatal_sex", "sex", "gender", "baby_sex"],
    ),
    // Early postnatal
    field(
        "temperature_celsius",
        Numeric,
        &["temperature_celsius", "temperature", "temp", "body_temp"],
    ),
    field(
        "feeding_status",
        FreeText,
        &["feeding_status", "feeding", "feed_status"],
    ),
    field(
        "activity_level",
        FreeText,
        &["activity_level", "activity", "alertness"],
    ),
    field(
        "respiratory_distress",
        BooleanLike,
        &["respiratory_distress", "breathing_distress", "resp_distress"],
    ),
    field(
        "heart_rate_bpm",
        Numeric,
        &["heart_rate_bpm", "heart_rate", "hr", "pulse"],
    ),
    field(
        "apnea_present",
        BooleanLike,
        &["apnea_present", "apnea", "breathing_pause"],
    ),
    field(
        "shock_present",
        BooleanLike,
        &["shock_present", "shock", "circulatory_shock"],
    ),
    // Haematological scoring system
    field(
        "hss_tlc_abnormal",
        BooleanLike,
        &["hss_tlc_abnormal", "tlc_abnormal", "wbc_abnormal"],
    ),
    field(
        "hss_anc_abnormal",
        BooleanLike,
        &["hss_anc_abnormal", "anc_abnormal", "neutrophil_abnormal"],
    ),
    field(
        "hss_it_ratio_high",
        BooleanLike,
        &["hss_it_ratio_high", "it_ratio_high", "immature_ratio"],
    ),
    field(
        "hss_im_ratio_high",
        BooleanLike,
        &["hss_im_ratio_high", "im_ratio_high"],
    ),
    field(
        "hss_platelet_low",
        BooleanLike,
        &["hss_platelet_low", "platelet_low", "low_platelets"],
    ),
    field(
        "hss_neutrophil_degeneration",
        BooleanLike,
        &[
            "hss_neutrophil_degeneration",
            "neutrophil_degeneration",
            "toxic_changes",
        ],
    ),
    field(
        "hss_nrbc_elevated",
        BooleanLike,
        &["hss_nrbc_elevated", "nrbc_elevated", "nucleated_rbc"],
    ),
];

const BUILTIN_EXAMPLES: &[&str] = &["birth_weight", "gestational_age", "apgar scores"];

/// Returns the built-in canonical schema.
pub fn builtin_schema() -> CanonicalSchema {
    let fields = BUILTIN_FIELDS
        .iter()
        .map(|def| {
            let field = CanonicalField::new(def.name, def.class, def.synonyms);
            match def.derived {
                Some(derived) => field.with_derived(DerivedCategory {
                    target: derived.target.to_string(),
                    bands: derived
                        .bands
                        .iter()
                        .map(|(limit, label)| CategoryBand {
                            limit: *limit,
                            label: (*label).to_string(),
                        })
                        .collect(),
                }),
                None => field,
            }
        })
        .collect();
    CanonicalSchema::assemble(
        BUILTIN_SCHEMA_NAME,
        BUILTIN_SCHEMA_VERSION,
        fields,
        BUILTIN_EXAMPLES.iter().map(|s| (*s).to_string()).collect(),
    )
}
