//! # Built-in Templates
//!
//! The checklists shipped with the application. Stored as static data and
//! converted to owned [`ChecklistTemplate`]s when a catalog is built.

use insp_core::TemplateId;

use crate::template::{ChecklistTemplate, TemplateSection};

struct BuiltinSection {
    title: &'static str,
    items: &'static [&'static str],
}

struct BuiltinTemplate {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    regulation: &'static str,
    sections: &'static [BuiltinSection],
}

const LADDER_INSPECTION: BuiltinTemplate = BuiltinTemplate {
    id: "ladder-inspection",
    title: "Ladder Inspection",
    description: "Pre-use and detailed visual check of step ladders and leaning ladders.",
    regulation: "Work at Height Regulations 2005",
    sections: &[
        BuiltinSection {
            title: "Stiles and Rungs",
            items: &[
                "Stiles straight and free from bends, cracks or splits",
                "Rungs and treads secure, undamaged and not bent",
                "No missing, loose or worn rungs",
                "Glass-fibre stiles free from exposed fibres, burns or chips",
                "Rungs and stiles free from paint, grease or mud",
                "No unauthorised repairs, drilled holes or modifications",
            ],
        },
        BuiltinSection {
            title: "Feet and Fittings",
            items: &[
                "Non-slip feet present, secure and not worn",
                "Rivets, bolts and welds secure",
                "Locking bars, spreaders and hinges operate correctly",
                "Platform (where fitted) secure and undamaged",
                "Tie rods and reinforcing bars intact",
            ],
        },
        BuiltinSection {
            title: "Labelling and Use",
            items: &[
                "Manufacturer label present and legible (EN 131 classification)",
                "Ladder non-conductive and suitable for electrical work",
                "Inspection tag or register entry up to date",
                "Correct ladder type and length for the task",
                "Ladder stored away from heat and damp",
            ],
        },
    ],
};

const CONSUMER_UNIT_VISUAL: BuiltinTemplate = BuiltinTemplate {
    id: "consumer-unit-visual",
    title: "Consumer Unit Visual Inspection",
    description: "Visual inspection of a consumer unit or distribution board before testing.",
    regulation: "BS 7671:2018+A2:2022 Regulation 651",
    sections: &[
        BuiltinSection {
            title: "Enclosure",
            items: &[
                "Enclosure secure and undamaged",
                "No signs of overheating, arcing or burning",
                "Ingress protection adequate (IP2X/IPXXB, top surface IP4X/IPXXD)",
                "Blanks fitted to all unused ways",
                "Enclosure of non-combustible material (Regulation 421.1.201)",
            ],
        },
        BuiltinSection {
            title: "Protective Devices",
            items: &[
                "Circuit breakers correctly rated for the circuits they protect",
                "RCD additional protection provided where required (Regulation 411.3.3)",
                "RCD integral test button operates",
                "SPD status indicator healthy (where fitted)",
                "Main switch identified and operable",
            ],
        },
        BuiltinSection {
            title: "Labelling and Documentation",
            items: &[
                "Circuit chart present and accurate",
                "RCD periodic test notice displayed",
                "Periodic inspection label present",
                "Mixed wiring colours warning notice (where applicable)",
                "Alternative supply warning notice (where applicable)",
            ],
        },
    ],
};

const PORTABLE_APPLIANCE_VISUAL: BuiltinTemplate = BuiltinTemplate {
    id: "portable-appliance-visual",
    title: "Portable Appliance Visual Inspection",
    description: "In-service formal visual inspection of portable electrical equipment.",
    regulation: "IET Code of Practice for In-service Inspection and Testing of Electrical Equipment",
    sections: &[
        BuiltinSection {
            title: "Plug",
            items: &[
                "Plug casing undamaged",
                "Correct fuse rating fitted",
                "Cord grip secure on the outer sheath",
                "No signs of overheating",
                "Plug to BS 1363",
            ],
        },
        BuiltinSection {
            title: "Flex",
            items: &[
                "Flex free from cuts, fraying or crushing",
                "No joints or taped repairs",
                "Flex of suitable type and length",
            ],
        },
        BuiltinSection {
            title: "Appliance",
            items: &[
                "Casing undamaged",
                "Switches and controls operate correctly",
                "No signs of overheating",
                "Suitable for the environment in use",
            ],
        },
    ],
};

const TEST_INSTRUMENT_PRE_USE: BuiltinTemplate = BuiltinTemplate {
    id: "test-instrument-pre-use",
    title: "Test Instrument Pre-use Check",
    description: "Condition check of test instruments, leads and voltage indicators before use.",
    regulation: "HSE Guidance Note GS38",
    sections: &[
        BuiltinSection {
            title: "Test Leads and Probes",
            items: &[
                "Lead insulation undamaged",
                "Probe tips exposed 4 mm or less (2 mm or less preferred)",
                "Finger barriers fitted",
                "Fused leads or current-limiting resistors fitted",
                "Leads of adequate but not excessive length",
            ],
        },
        BuiltinSection {
            title: "Instrument",
            items: &[
                "Case undamaged and battery compartment secure",
                "Battery condition satisfactory",
                "Calibration in date",
                "Lead resistance nulled",
            ],
        },
        BuiltinSection {
            title: "Voltage Indicator",
            items: &[
                "Approved two-pole voltage indicator available",
                "Proving unit available and functional",
                "Voltage indicator proved before and after use",
            ],
        },
    ],
};

const SAFE_ISOLATION: BuiltinTemplate = BuiltinTemplate {
    id: "safe-isolation",
    title: "Safe Isolation Procedure",
    description: "Step-by-step confirmation that a circuit is isolated and proven dead.",
    regulation: "Electricity at Work Regulations 1989, Regulations 12, 13 and 14",
    sections: &[
        BuiltinSection {
            title: "Preparation",
            items: &[
                "Permission to isolate obtained",
                "Correct point of isolation identified",
                "Approved voltage indicator and proving unit available",
            ],
        },
        BuiltinSection {
            title: "Isolation",
            items: &[
                "Circuit or equipment switched off and isolated",
                "Isolation locked off and key retained",
                "Caution notice fitted at the point of isolation",
            ],
        },
        BuiltinSection {
            title: "Verification",
            items: &[
                "Voltage indicator proved on a known live source",
                "All conductor combinations tested dead",
                "Voltage indicator re-proved on a known live source",
                "Work area confirmed safe to proceed",
            ],
        },
    ],
};

const BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    LADDER_INSPECTION,
    CONSUMER_UNIT_VISUAL,
    PORTABLE_APPLIANCE_VISUAL,
    TEST_INSTRUMENT_PRE_USE,
    SAFE_ISOLATION,
];

/// Id of the ladder inspection template.
pub const LADDER_INSPECTION_ID: &str = LADDER_INSPECTION.id;

impl BuiltinTemplate {
    fn to_template(&self) -> Option<ChecklistTemplate> {
        let id = match TemplateId::new(self.id) {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(id = self.id, error = %e, "skipping built-in template");
                return None;
            }
        };
        Some(ChecklistTemplate {
            id,
            title: self.title.to_string(),
            description: self.description.to_string(),
            sections: self
                .sections
                .iter()
                .map(|s| TemplateSection {
                    title: s.title.to_string(),
                    items: s.items.iter().map(|i| i.to_string()).collect(),
                })
                .collect(),
            regulation: self.regulation.to_string(),
        })
    }
}

/// All built-in templates, in catalog order.
pub fn builtin_templates() -> Vec<ChecklistTemplate> {
    BUILTIN_TEMPLATES
        .iter()
        .filter_map(BuiltinTemplate::to_template)
        .collect()
}
