//! Static registry of the indicators compared for every country.

use crate::models::{FormatKind, IndicatorDefinition};

/// World Bank code of the exports indicator (used for the trade balance).
pub const EXPORTS: &str = "NE.EXP.GNFS.CD";
/// World Bank code of the imports indicator (used for the trade balance).
pub const IMPORTS: &str = "NE.IMP.GNFS.CD";

// (code, display name, unit, format), in display order.
const BUILTIN: [(&str, &str, &str, FormatKind); 14] = [
    ("NY.GDP.MKTP.CD", "Nominal GDP", "USD", FormatKind::Currency),
    ("NY.GDP.MKTP.KD", "Real GDP", "USD (constant)", FormatKind::Currency),
    ("NY.GDP.PCAP.CD", "GDP per capita", "USD", FormatKind::Currency),
    (EXPORTS, "Exports", "USD", FormatKind::Currency),
    (IMPORTS, "Imports", "USD", FormatKind::Currency),
    ("SI.POV.GINI", "Gini coefficient", "Index", FormatKind::Decimal),
    ("NY.GDP.MKTP.KD.ZG", "GDP growth rate", "%", FormatKind::Percentage),
    ("FP.CPI.TOTL.ZG", "Inflation Rate (CPI)", "%", FormatKind::Percentage),
    ("FR.INR.RINR", "Real Interest Rate", "%", FormatKind::Percentage),
    ("FR.INR.LEND", "Lending Interest Rate", "%", FormatKind::Percentage),
    ("SL.UEM.TOTL.ZS", "Unemployment Rate", "%", FormatKind::Percentage),
    ("SP.POP.TOTL", "Population", "People", FormatKind::Count),
    ("SP.POP.GROW", "Population Growth Rate", "%", FormatKind::Percentage),
    ("PA.NUS.FCRF", "Exchange Rate (LCU per USD)", "LCU/USD", FormatKind::Decimal),
];

/// Ordered, immutable set of indicator definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorRegistry {
    defs: Vec<IndicatorDefinition>,
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new(
            BUILTIN
                .iter()
                .map(|&(code, name, unit, format)| IndicatorDefinition {
                    code: code.into(),
                    name: name.into(),
                    unit: unit.into(),
                    format,
                })
                .collect(),
        )
    }
}

impl IndicatorRegistry {
    /// Build a registry from custom definitions. Later duplicates of a code are ignored.
    pub fn new(defs: Vec<IndicatorDefinition>) -> Self {
        let mut out: Vec<IndicatorDefinition> = Vec::with_capacity(defs.len());
        for d in defs {
            if !out.iter().any(|o| o.code == d.code) {
                out.push(d);
            }
        }
        Self { defs: out }
    }

    pub fn get(&self, code: &str) -> Option<&IndicatorDefinition> {
        self.defs.iter().find(|d| d.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IndicatorDefinition> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}
