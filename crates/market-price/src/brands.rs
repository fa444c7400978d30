//! Vocabulary of the price list: brand headings, section headings to ignore,
//! and how a combined "model sub-model" string is split.

use once_cell::sync::Lazy;
use std::collections::HashSet;

const BRANDS: &[&str] = &[
    // Cars
    "AION", "ALFA ROMEO", "ASTON MARTIN", "AUDI", "AUSTIN", "AVATR", "BENTLEY", "BMW", "BYD",
    "CADILLAC", "CHANGAN", "CHERY", "CHEVROLET", "CHRYSLER", "CITROEN", "DAIHATSU", "DEEPAL",
    "DENZA", "DFSK", "FERRARI", "FIAT", "FORD", "GEELY", "GWM TANK", "HAVAL", "HINO", "HONDA",
    "HUMMER", "HYUNDAI", "ISUZU", "JAECOO", "JAGUAR", "JEEP", "KIA", "LAMBORGHINI", "LAND ROVER",
    "LEAPMOTOR", "LEXUS", "LOTUS", "MASERATI", "MAZDA", "MCLAREN", "MERCEDES BENZ", "MG", "MINI",
    "MITSUBISHI", "MITSUOKA", "NAZA", "NETA", "NISSAN", "OMODA", "OPEL", "ORA", "PEEUGEOT",
    "PORSCHE", "PROTON", "RANGE ROVER", "RIDDARA", "ROLLS-ROYCE", "ROVER", "SAAB", "SEAT",
    "SKODA", "SSANGYONG", "SUBARU", "SUZUKI", "TATA", "TESLA", "THAIRUNG", "TOYOTA",
    "VOLKSWAGEN", "VOLVO", "WULING", "XPENG", "ZEEKR",
    // Motorcycles
    "AJ", "APRILIA", "ARIIC", "BAJAJ", "BENELLI", "CFMOTO", "DECO", "DUCATI", "EM", "GPX",
    "H SEM", "HAONAIQI", "HARLEY DAVIDSON", "HUSQVARNA", "INDIAN", "JRD", "KAVALLO", "KAWASAKI",
    "KTM", "LAMBRETTA", "LION", "M-BIKE", "MOTO GUZZI", "MV AGUSTA", "PIAGGIO", "PLATINUM",
    "ROYAL ENFIELD", "RYUKA", "SCOMADI", "SOLAR", "STALLIONS", "SYM", "TIGER", "TRIUMPH", "VESPA",
    "YAMAHA",
];

/// Grouping headings that never name a model.
const JUNK_HEADINGS: &[&str] = &[
    "SPORTBACK", "SERIES 1", "SERIES 2", "SERIES 3", "SERIES 4", "SERIES 5", "SERIES 6",
    "SERIES 7", "SERIES 8", "M SERIES", "X1 SERIES", "X2 SERIES", "X3 SERIES", "X4 SERIES",
    "X5 SERIES", "X6 SERIES", "X7 SERIES", "XM SERIES", "Z SERIES", "I SERIES", "IX SERIES",
    "HATCH 3 DOOR", "HATCH 5 DOOR", "COUPE", "ROADSTER", "CONVERTIBLE", "CLUBMAN", "COUNTRYMΑΝ",
    "JOHN COOPER WORKS (JCW)", "C-SERIES", "EX-SERIES", "S-SERIES", "V-SERIES", "XC-SERIES",
];

/// Brands whose whole line is the model name.
const SINGLE_MODEL_BRANDS: &[&str] = &[
    "AION", "TESLA", "NETA", "XPENG", "ZEEKR", "LEAPMOTOR", "AVATR", "DEEPAL", "DENZA", "ORA",
];

/// Multi-word model names that must not be split at the first space.
const MODEL_PREFIXES: &[&str] = &[
    "HILUX CHAMP",
    "HILUX REVO",
    "HILUX VIGO",
    "COROLLA ALTIS",
    "COROLLA CROSS",
    "LAND CRUISER",
    "YARIS ATIV",
    "YARIS CROSS",
    "RANGER DOUBLE CAB",
    "RANGER SUPER CAB",
    "RANGER STANDARD CAB",
    "PAJERO SPORT",
    "COLORADO HIGH COUNTRY",
];

static BRAND_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| BRANDS.iter().copied().collect());
static JUNK_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| JUNK_HEADINGS.iter().copied().collect());

pub fn is_brand(line: &str) -> bool {
    BRAND_SET.contains(line)
}

pub fn is_junk_heading(line: &str) -> bool {
    JUNK_SET.contains(line)
}

pub fn is_single_model_brand(brand: &str) -> bool {
    SINGLE_MODEL_BRANDS.contains(&brand)
}

/// Resolve the brand a heading line switches to.
///
/// A one-word heading joins the current brand when the two together form a
/// known brand. No two entries of the built-in brand list combine that way,
/// so with the lists this crate ships the heading always becomes the brand
/// as-is; the join only matters if a brand and its continuation are both
/// added as separate entries.
pub fn next_brand(current: Option<&str>, heading: &str) -> String {
    let single_word = !heading.contains(' ');
    if let Some(current) = current.filter(|c| !c.is_empty()) {
        let joined = format!("{current} {heading}");
        if single_word && is_brand(&joined) {
            return joined;
        }
    }
    heading.to_string()
}

/// Split `"HILUX VIGO 2.5 E"` into `("HILUX VIGO", "2.5 E")`.
///
/// Single-model brands keep the whole string as the model. Known multi-word
/// models are matched as prefixes. Everything else splits at the first word.
pub fn split_model(full: &str, brand: &str) -> (String, String) {
    if is_single_model_brand(brand) {
        return (full.to_string(), String::new());
    }

    if let Some(prefix) = MODEL_PREFIXES.iter().find(|p| full.starts_with(**p)) {
        let rest = full[prefix.len()..].trim();
        return (prefix.to_string(), rest.to_string());
    }

    let mut words = full.split_whitespace();
    match (words.next(), words.clone().next()) {
        (Some(first), Some(_)) => (first.to_string(), words.collect::<Vec<_>>().join(" ")),
        _ => (full.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_lookup() {
        assert!(is_brand("TOYOTA"));
        assert!(is_brand("MERCEDES BENZ"));
        assert!(!is_brand("toyota"));
        assert!(!is_brand("CIVIC"));
    }

    #[test]
    fn test_next_brand_switches_to_heading() {
        assert_eq!(next_brand(Some("ROVER"), "ROVER"), "ROVER");
        assert_eq!(next_brand(Some("LAND ROVER"), "ROVER"), "ROVER");
        assert_eq!(next_brand(None, "ROVER"), "ROVER");
        assert_eq!(next_brand(Some(""), "ROVER"), "ROVER");
        assert_eq!(next_brand(Some("TOYOTA"), "HONDA"), "HONDA");
        assert_eq!(next_brand(Some("TOYOTA"), "GWM TANK"), "GWM TANK");
    }

    #[test]
    fn test_no_builtin_brands_join() {
        for current in BRANDS {
            for heading in BRANDS.iter().filter(|h| !h.contains(' ')) {
                assert_eq!(next_brand(Some(*current), heading), *heading);
            }
        }
    }

    #[test]
    fn test_next_brand_joins_known_two_word_brand() {
        // Only reachable when the current brand is a prefix word.
        assert_eq!(next_brand(Some("RANGE"), "ROVER"), "RANGE ROVER");
        assert_eq!(next_brand(Some("RANGE"), "HONDA"), "HONDA");
    }

    #[test]
    fn test_split_single_model_brand() {
        assert_eq!(
            split_model("MODEL 3 LONG RANGE", "TESLA"),
            ("MODEL 3 LONG RANGE".to_string(), String::new())
        );
    }

    #[test]
    fn test_split_known_prefix() {
        assert_eq!(
            split_model("HILUX VIGO 2.5 E", "TOYOTA"),
            ("HILUX VIGO".to_string(), "2.5 E".to_string())
        );
        assert_eq!(
            split_model("PAJERO SPORT", "MITSUBISHI"),
            ("PAJERO SPORT".to_string(), String::new())
        );
    }

    #[test]
    fn test_split_first_word() {
        assert_eq!(
            split_model("CIVIC 1.5 TURBO RS", "HONDA"),
            ("CIVIC".to_string(), "1.5 TURBO RS".to_string())
        );
        assert_eq!(split_model("A1", "AUDI"), ("A1".to_string(), String::new()));
    }

    #[test]
    fn test_junk_headings() {
        assert!(is_junk_heading("SERIES 3"));
        assert!(is_junk_heading("COUPE"));
        assert!(!is_junk_heading("A4"));
    }
}
