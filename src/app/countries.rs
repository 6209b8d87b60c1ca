//! Storefront catalog and scan breadth presets
//!
//! The catalog is a static table of every App Store storefront. Breadth
//! presets select an ordered subset of it: `quick` for the five largest
//! English-speaking markets, `major` for twenty major markets and `global`
//! for the whole catalog.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Flag shown for codes that are not in the catalog
pub const PLACEHOLDER_FLAG: &str = "🏳️";

/// Geographic grouping of storefronts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Americas,
    Europe,
    AsiaPacific,
    MiddleEastAfrica,
    /// Placeholder region for codes outside the catalog
    Unknown,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Americas,
        Region::Europe,
        Region::AsiaPacific,
        Region::MiddleEastAfrica,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Americas => "americas",
            Region::Europe => "europe",
            Region::AsiaPacific => "asia-pacific",
            Region::MiddleEastAfrica => "middle-east-africa",
            Region::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "americas" => Ok(Region::Americas),
            "europe" => Ok(Region::Europe),
            "asia-pacific" | "apac" => Ok(Region::AsiaPacific),
            "middle-east-africa" | "mea" => Ok(Region::MiddleEastAfrica),
            other => Err(format!("unknown region '{}'", other)),
        }
    }
}

/// A storefront entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    /// Two-letter upper-case storefront code
    pub code: String,
    pub name: String,
    pub flag: String,
    pub region: Region,
}

impl Country {
    fn from_row(row: &CatalogRow) -> Self {
        Self {
            code: row.0.to_string(),
            name: row.1.to_string(),
            flag: row.2.to_string(),
            region: row.3,
        }
    }

    /// Entry used when a code is not in the catalog
    pub fn placeholder(code: &str) -> Self {
        let code = code.trim().to_ascii_uppercase();
        Self {
            name: code.clone(),
            code,
            flag: PLACEHOLDER_FLAG.to_string(),
            region: Region::Unknown,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.region == Region::Unknown
    }
}

/// Named scan breadth
///
/// Deserializes through [`BreadthPreset::parse`], so unknown names become
/// `quick` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum BreadthPreset {
    #[default]
    Quick,
    Major,
    Global,
}

impl BreadthPreset {
    pub const ALL: [BreadthPreset; 3] = [
        BreadthPreset::Quick,
        BreadthPreset::Major,
        BreadthPreset::Global,
    ];

    /// Parse a preset name, degrading to the narrowest preset on anything unknown
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "quick" => BreadthPreset::Quick,
            "major" => BreadthPreset::Major,
            "global" => BreadthPreset::Global,
            other => {
                debug!("Unknown breadth preset '{}', using quick", other);
                BreadthPreset::Quick
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BreadthPreset::Quick => "quick",
            BreadthPreset::Major => "major",
            BreadthPreset::Global => "global",
        }
    }
}

impl fmt::Display for BreadthPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for BreadthPreset {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl FromStr for BreadthPreset {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Codes scanned by the `quick` preset
pub const QUICK_MARKETS: [&str; 5] = ["US", "IN", "GB", "CA", "AU"];

/// Codes scanned by the `major` preset
pub const MAJOR_MARKETS: [&str; 20] = [
    "US", "GB", "CA", "AU", "IN", // English-speaking
    "DE", "FR", "IT", "ES", "NL", // Western Europe
    "JP", "KR", "CN", "TW", "HK", // East Asia
    "BR", "MX", "AR", // Latin America
    "RU", "TR", // Eastern Europe
];

/// Resolve a preset to its ordered country list
pub fn resolve_breadth(preset: BreadthPreset) -> Vec<Country> {
    match preset {
        BreadthPreset::Quick => QUICK_MARKETS.iter().map(|code| lookup(code)).collect(),
        BreadthPreset::Major => MAJOR_MARKETS.iter().map(|code| lookup(code)).collect(),
        BreadthPreset::Global => all_countries(),
    }
}

/// Look up a storefront by code; unknown codes yield a placeholder
pub fn lookup(code: &str) -> Country {
    let key = code.trim().to_ascii_uppercase();
    match index().get(key.as_str()) {
        Some(&position) => Country::from_row(&CATALOG[position]),
        None => Country::placeholder(&key),
    }
}

/// Every storefront in catalog order
pub fn all_countries() -> Vec<Country> {
    CATALOG.iter().map(Country::from_row).collect()
}

/// Storefronts of one region in catalog order
pub fn countries_in_region(region: Region) -> Vec<Country> {
    CATALOG
        .iter()
        .filter(|row| row.3 == region)
        .map(Country::from_row)
        .collect()
}

/// Number of storefronts in the catalog
pub fn catalog_size() -> usize {
    CATALOG.len()
}

fn index() -> &'static HashMap<&'static str, usize> {
    static INDEX: OnceLock<HashMap<&'static str, usize>> = OnceLock::new();
    INDEX.get_or_init(|| {
        CATALOG
            .iter()
            .enumerate()
            .map(|(position, row)| (row.0, position))
            .collect()
    })
}

type CatalogRow = (&'static str, &'static str, &'static str, Region);

use Region::{AsiaPacific as Apac, Americas as Am, Europe as Eu, MiddleEastAfrica as Mea};

static CATALOG: [CatalogRow; 175] = [
    // Americas (35)
    ("US", "United States", "🇺🇸", Am),
    ("CA", "Canada", "🇨🇦", Am),
    ("MX", "Mexico", "🇲🇽", Am),
    ("BR", "Brazil", "🇧🇷", Am),
    ("AR", "Argentina", "🇦🇷", Am),
    ("CL", "Chile", "🇨🇱", Am),
    ("CO", "Colombia", "🇨🇴", Am),
    ("PE", "Peru", "🇵🇪", Am),
    ("VE", "Venezuela", "🇻🇪", Am),
    ("EC", "Ecuador", "🇪🇨", Am),
    ("GT", "Guatemala", "🇬🇹", Am),
    ("CU", "Cuba", "🇨🇺", Am),
    ("BO", "Bolivia", "🇧🇴", Am),
    ("DO", "Dominican Republic", "🇩🇴", Am),
    ("HN", "Honduras", "🇭🇳", Am),
    ("PY", "Paraguay", "🇵🇾", Am),
    ("SV", "El Salvador", "🇸🇻", Am),
    ("NI", "Nicaragua", "🇳🇮", Am),
    ("CR", "Costa Rica", "🇨🇷", Am),
    ("PA", "Panama", "🇵🇦", Am),
    ("UY", "Uruguay", "🇺🇾", Am),
    ("JM", "Jamaica", "🇯🇲", Am),
    ("TT", "Trinidad and Tobago", "🇹🇹", Am),
    ("BS", "Bahamas", "🇧🇸", Am),
    ("BB", "Barbados", "🇧🇧", Am),
    ("BZ", "Belize", "🇧🇿", Am),
    ("GY", "Guyana", "🇬🇾", Am),
    ("SR", "Suriname", "🇸🇷", Am),
    ("AI", "Anguilla", "🇦🇮", Am),
    ("AG", "Antigua and Barbuda", "🇦🇬", Am),
    ("VG", "British Virgin Islands", "🇻🇬", Am),
    ("KY", "Cayman Islands", "🇰🇾", Am),
    ("DM", "Dominica", "🇩🇲", Am),
    ("GD", "Grenada", "🇬🇩", Am),
    ("MS", "Montserrat", "🇲🇸", Am),
    // Europe (44)
    ("GB", "United Kingdom", "🇬🇧", Eu),
    ("DE", "Germany", "🇩🇪", Eu),
    ("FR", "France", "🇫🇷", Eu),
    ("IT", "Italy", "🇮🇹", Eu),
    ("ES", "Spain", "🇪🇸", Eu),
    ("NL", "Netherlands", "🇳🇱", Eu),
    ("BE", "Belgium", "🇧🇪", Eu),
    ("AT", "Austria", "🇦🇹", Eu),
    ("CH", "Switzerland", "🇨🇭", Eu),
    ("SE", "Sweden", "🇸🇪", Eu),
    ("NO", "Norway", "🇳🇴", Eu),
    ("DK", "Denmark", "🇩🇰", Eu),
    ("FI", "Finland", "🇫🇮", Eu),
    ("PL", "Poland", "🇵🇱", Eu),
    ("PT", "Portugal", "🇵🇹", Eu),
    ("IE", "Ireland", "🇮🇪", Eu),
    ("GR", "Greece", "🇬🇷", Eu),
    ("CZ", "Czech Republic", "🇨🇿", Eu),
    ("RO", "Romania", "🇷🇴", Eu),
    ("HU", "Hungary", "🇭🇺", Eu),
    ("SK", "Slovakia", "🇸🇰", Eu),
    ("BG", "Bulgaria", "🇧🇬", Eu),
    ("HR", "Croatia", "🇭🇷", Eu),
    ("SI", "Slovenia", "🇸🇮", Eu),
    ("LT", "Lithuania", "🇱🇹", Eu),
    ("LV", "Latvia", "🇱🇻", Eu),
    ("EE", "Estonia", "🇪🇪", Eu),
    ("LU", "Luxembourg", "🇱🇺", Eu),
    ("MT", "Malta", "🇲🇹", Eu),
    ("CY", "Cyprus", "🇨🇾", Eu),
    ("IS", "Iceland", "🇮🇸", Eu),
    ("UA", "Ukraine", "🇺🇦", Eu),
    ("RU", "Russia", "🇷🇺", Eu),
    ("TR", "Turkey", "🇹🇷", Eu),
    ("RS", "Serbia", "🇷🇸", Eu),
    ("BA", "Bosnia and Herzegovina", "🇧🇦", Eu),
    ("MK", "North Macedonia", "🇲🇰", Eu),
    ("AL", "Albania", "🇦🇱", Eu),
    ("ME", "Montenegro", "🇲🇪", Eu),
    ("XK", "Kosovo", "🇽🇰", Eu),
    ("MD", "Moldova", "🇲🇩", Eu),
    ("BY", "Belarus", "🇧🇾", Eu),
    ("GE", "Georgia", "🇬🇪", Eu),
    ("AM", "Armenia", "🇦🇲", Eu),
    // Asia Pacific (51)
    ("AU", "Australia", "🇦🇺", Apac),
    ("NZ", "New Zealand", "🇳🇿", Apac),
    ("JP", "Japan", "🇯🇵", Apac),
    ("KR", "South Korea", "🇰🇷", Apac),
    ("CN", "China", "🇨🇳", Apac),
    ("HK", "Hong Kong", "🇭🇰", Apac),
    ("TW", "Taiwan", "🇹🇼", Apac),
    ("SG", "Singapore", "🇸🇬", Apac),
    ("IN", "India", "🇮🇳", Apac),
    ("ID", "Indonesia", "🇮🇩", Apac),
    ("MY", "Malaysia", "🇲🇾", Apac),
    ("TH", "Thailand", "🇹🇭", Apac),
    ("VN", "Vietnam", "🇻🇳", Apac),
    ("PH", "Philippines", "🇵🇭", Apac),
    ("PK", "Pakistan", "🇵🇰", Apac),
    ("BD", "Bangladesh", "🇧🇩", Apac),
    ("LK", "Sri Lanka", "🇱🇰", Apac),
    ("NP", "Nepal", "🇳🇵", Apac),
    ("MM", "Myanmar", "🇲🇲", Apac),
    ("KH", "Cambodia", "🇰🇭", Apac),
    ("LA", "Laos", "🇱🇦", Apac),
    ("BN", "Brunei", "🇧🇳", Apac),
    ("MO", "Macau", "🇲🇴", Apac),
    ("MN", "Mongolia", "🇲🇳", Apac),
    ("KZ", "Kazakhstan", "🇰🇿", Apac),
    ("UZ", "Uzbekistan", "🇺🇿", Apac),
    ("KG", "Kyrgyzstan", "🇰🇬", Apac),
    ("TJ", "Tajikistan", "🇹🇯", Apac),
    ("TM", "Turkmenistan", "🇹🇲", Apac),
    ("AZ", "Azerbaijan", "🇦🇿", Apac),
    ("AF", "Afghanistan", "🇦🇫", Apac),
    ("MV", "Maldives", "🇲🇻", Apac),
    ("BT", "Bhutan", "🇧🇹", Apac),
    ("FJ", "Fiji", "🇫🇯", Apac),
    ("PG", "Papua New Guinea", "🇵🇬", Apac),
    ("SB", "Solomon Islands", "🇸🇧", Apac),
    ("VU", "Vanuatu", "🇻🇺", Apac),
    ("WS", "Samoa", "🇼🇸", Apac),
    ("TO", "Tonga", "🇹🇴", Apac),
    ("FM", "Micronesia", "🇫🇲", Apac),
    ("PW", "Palau", "🇵🇼", Apac),
    ("NR", "Nauru", "🇳🇷", Apac),
    ("GU", "Guam", "🇬🇺", Apac),
    ("NC", "New Caledonia", "🇳🇨", Apac),
    ("PF", "French Polynesia", "🇵🇫", Apac),
    ("CK", "Cook Islands", "🇨🇰", Apac),
    ("NU", "Niue", "🇳🇺", Apac),
    ("TK", "Tokelau", "🇹🇰", Apac),
    ("TV", "Tuvalu", "🇹🇻", Apac),
    ("KI", "Kiribati", "🇰🇮", Apac),
    ("MH", "Marshall Islands", "🇲🇭", Apac),
    // Middle East & Africa (45)
    ("AE", "United Arab Emirates", "🇦🇪", Mea),
    ("SA", "Saudi Arabia", "🇸🇦", Mea),
    ("IL", "Israel", "🇮🇱", Mea),
    ("EG", "Egypt", "🇪🇬", Mea),
    ("ZA", "South Africa", "🇿🇦", Mea),
    ("NG", "Nigeria", "🇳🇬", Mea),
    ("KE", "Kenya", "🇰🇪", Mea),
    ("MA", "Morocco", "🇲🇦", Mea),
    ("DZ", "Algeria", "🇩🇿", Mea),
    ("TN", "Tunisia", "🇹🇳", Mea),
    ("LY", "Libya", "🇱🇾", Mea),
    ("SD", "Sudan", "🇸🇩", Mea),
    ("ET", "Ethiopia", "🇪🇹", Mea),
    ("GH", "Ghana", "🇬🇭", Mea),
    ("CI", "Côte d'Ivoire", "🇨🇮", Mea),
    ("SN", "Senegal", "🇸🇳", Mea),
    ("CM", "Cameroon", "🇨🇲", Mea),
    ("TZ", "Tanzania", "🇹🇿", Mea),
    ("UG", "Uganda", "🇺🇬", Mea),
    ("RW", "Rwanda", "🇷🇼", Mea),
    ("ZM", "Zambia", "🇿🇲", Mea),
    ("ZW", "Zimbabwe", "🇿🇼", Mea),
    ("BW", "Botswana", "🇧🇼", Mea),
    ("NA", "Namibia", "🇳🇦", Mea),
    ("MZ", "Mozambique", "🇲🇿", Mea),
    ("AO", "Angola", "🇦🇴", Mea),
    ("MU", "Mauritius", "🇲🇺", Mea),
    ("MG", "Madagascar", "🇲🇬", Mea),
    ("JO", "Jordan", "🇯🇴", Mea),
    ("LB", "Lebanon", "🇱🇧", Mea),
    ("KW", "Kuwait", "🇰🇼", Mea),
    ("QA", "Qatar", "🇶🇦", Mea),
    ("BH", "Bahrain", "🇧🇭", Mea),
    ("OM", "Oman", "🇴🇲", Mea),
    ("YE", "Yemen", "🇾🇪", Mea),
    ("IQ", "Iraq", "🇮🇶", Mea),
    ("SY", "Syria", "🇸🇾", Mea),
    ("PS", "Palestine", "🇵🇸", Mea),
    ("ML", "Mali", "🇲🇱", Mea),
    ("NE", "Niger", "🇳🇪", Mea),
    ("BF", "Burkina Faso", "🇧🇫", Mea),
    ("BJ", "Benin", "🇧🇯", Mea),
    ("TG", "Togo", "🇹🇬", Mea),
    ("SL", "Sierra Leone", "🇸🇱", Mea),
    ("LR", "Liberia", "🇱🇷", Mea),
];
