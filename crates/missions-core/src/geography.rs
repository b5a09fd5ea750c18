//! Country derivation for launch locations.
//!
//! A location such as `"LC-39A, Kennedy Space Center, Florida, USA"` is
//! reduced to its trailing segment, redirected through [`LOCATION_OVERRIDES`]
//! when that segment is not a country, and then looked up in the ISO 3166-1
//! table to obtain an alpha-3 code.


/// Trailing location labels that are not countries, mapped to the nation
/// that operates the site.
pub const LOCATION_OVERRIDES: &[(&str, &str)] = &[
    ("Russia", "Russian Federation"),
    ("New Mexico", "USA"),
    ("Yellow Sea", "China"),
    ("Shahrud Missile Test Site", "Iran"),
    ("Pacific Missile Range Facility", "USA"),
    ("Barents Sea", "Russian Federation"),
    ("Gran Canaria", "USA"),
];

/// Codes forced for labels the ISO table names differently.
pub const CODE_OVERRIDES: &[(&str, &str)] = &[("North Korea", "PRK"), ("South Korea", "KOR")];

/// ISO 3166-1 short names and alpha-3 codes.
pub const ISO_COUNTRIES: &[(&str, &str)] = &[
    ("Afghanistan", "AFG"),
    ("Åland Islands", "ALA"),
    ("Albania", "ALB"),
    ("Algeria", "DZA"),
    ("American Samoa", "ASM"),
    ("Andorra", "AND"),
    ("Angola", "AGO"),
    ("Anguilla", "AIA"),
    ("Antarctica", "ATA"),
    ("Antigua and Barbuda", "ATG"),
    ("Argentina", "ARG"),
    ("Armenia", "ARM"),
    ("Aruba", "ABW"),
    ("Australia", "AUS"),
    ("Austria", "AUT"),
    ("Azerbaijan", "AZE"),
    ("Bahamas", "BHS"),
    ("Bahrain", "BHR"),
    ("Bangladesh", "BGD"),
    ("Barbados", "BRB"),
    ("Belarus", "BLR"),
    ("Belgium", "BEL"),
    ("Belize", "BLZ"),
    ("Benin", "BEN"),
    ("Bermuda", "BMU"),
    ("Bhutan", "BTN"),
    ("Bolivia, Plurinational State of", "BOL"),
    ("Bonaire, Sint Eustatius and Saba", "BES"),
    ("Bosnia and Herzegovina", "BIH"),
    ("Botswana", "BWA"),
    ("Bouvet Island", "BVT"),
    ("Brazil", "BRA"),
    ("British Indian Ocean Territory", "IOT"),
    ("Brunei Darussalam", "BRN"),
    ("Bulgaria", "BGR"),
    ("Burkina Faso", "BFA"),
    ("Burundi", "BDI"),
    ("Cabo Verde", "CPV"),
    ("Cambodia", "KHM"),
    ("Cameroon", "CMR"),
    ("Canada", "CAN"),
    ("Cayman Islands", "CYM"),
    ("Central African Republic", "CAF"),
    ("Chad", "TCD"),
    ("Chile", "CHL"),
    ("China", "CHN"),
    ("Christmas Island", "CXR"),
    ("Cocos (Keeling) Islands", "CCK"),
    ("Colombia", "COL"),
    ("Comoros", "COM"),
    ("Congo", "COG"),
    ("Congo, Democratic Republic of the", "COD"),
    ("Cook Islands", "COK"),
    ("Costa Rica", "CRI"),
    ("Côte d'Ivoire", "CIV"),
    ("Croatia", "HRV"),
    ("Cuba", "CUB"),
    ("Curaçao", "CUW"),
    ("Cyprus", "CYP"),
    ("Czechia", "CZE"),
    ("Denmark", "DNK"),
    ("Djibouti", "DJI"),
    ("Dominica", "DMA"),
    ("Dominican Republic", "DOM"),
    ("Ecuador", "ECU"),
    ("Egypt", "EGY"),
    ("El Salvador", "SLV"),
    ("Equatorial Guinea", "GNQ"),
    ("Eritrea", "ERI"),
    ("Estonia", "EST"),
    ("Eswatini", "SWZ"),
    ("Ethiopia", "ETH"),
    ("Falkland Islands (Malvinas)", "FLK"),
    ("Faroe Islands", "FRO"),
    ("Fiji", "FJI"),
    ("Finland", "FIN"),
    ("France", "FRA"),
    ("French Guiana", "GUF"),
    ("French Polynesia", "PYF"),
    ("French Southern Territories", "ATF"),
    ("Gabon", "GAB"),
    ("Gambia", "GMB"),
    ("Georgia", "GEO"),
    ("Germany", "DEU"),
    ("Ghana", "GHA"),
    ("Gibraltar", "GIB"),
    ("Greece", "GRC"),
    ("Greenland", "GRL"),
    ("Grenada", "GRD"),
    ("Guadeloupe", "GLP"),
    ("Guam", "GUM"),
    ("Guatemala", "GTM"),
    ("Guernsey", "GGY"),
    ("Guinea", "GIN"),
    ("Guinea-Bissau", "GNB"),
    ("Guyana", "GUY"),
    ("Haiti", "HTI"),
    ("Heard Island and McDonald Islands", "HMD"),
    ("Holy See", "VAT"),
    ("Honduras", "HND"),
    ("Hong Kong", "HKG"),
    ("Hungary", "HUN"),
    ("Iceland", "ISL"),
    ("India", "IND"),
    ("Indonesia", "IDN"),
    ("Iran, Islamic Republic of", "IRN"),
    ("Iraq", "IRQ"),
    ("Ireland", "IRL"),
    ("Isle of Man", "IMN"),
    ("Israel", "ISR"),
    ("Italy", "ITA"),
    ("Jamaica", "JAM"),
    ("Japan", "JPN"),
    ("Jersey", "JEY"),
    ("Jordan", "JOR"),
    ("Kazakhstan", "KAZ"),
    ("Kenya", "KEN"),
    ("Kiribati", "KIR"),
    ("Korea, Democratic People's Republic of", "PRK"),
    ("Korea, Republic of", "KOR"),
    ("Kuwait", "KWT"),
    ("Kyrgyzstan", "KGZ"),
    ("Lao People's Democratic Republic", "LAO"),
    ("Latvia", "LVA"),
    ("Lebanon", "LBN"),
    ("Lesotho", "LSO"),
    ("Liberia", "LBR"),
    ("Libya", "LBY"),
    ("Liechtenstein", "LIE"),
    ("Lithuania", "LTU"),
    ("Luxembourg", "LUX"),
    ("Macao", "MAC"),
    ("Madagascar", "MDG"),
    ("Malawi", "MWI"),
    ("Malaysia", "MYS"),
    ("Maldives", "MDV"),
    ("Mali", "MLI"),
    ("Malta", "MLT"),
    ("Marshall Islands", "MHL"),
    ("Martinique", "MTQ"),
    ("Mauritania", "MRT"),
    ("Mauritius", "MUS"),
    ("Mayotte", "MYT"),
    ("Mexico", "MEX"),
    ("Micronesia, Federated States of", "FSM"),
    ("Moldova, Republic of", "MDA"),
    ("Monaco", "MCO"),
    ("Mongolia", "MNG"),
    ("Montenegro", "MNE"),
    ("Montserrat", "MSR"),
    ("Morocco", "MAR"),
    ("Mozambique", "MOZ"),
    ("Myanmar", "MMR"),
    ("Namibia", "NAM"),
    ("Nauru", "NRU"),
    ("Nepal", "NPL"),
    ("Netherlands", "NLD"),
    ("New Caledonia", "NCL"),
    ("New Zealand", "NZL"),
    ("Nicaragua", "NIC"),
    ("Niger", "NER"),
    ("Nigeria", "NGA"),
    ("Niue", "NIU"),
    ("Norfolk Island", "NFK"),
    ("North Macedonia", "MKD"),
    ("Northern Mariana Islands", "MNP"),
    ("Norway", "NOR"),
    ("Oman", "OMN"),
    ("Pakistan", "PAK"),
    ("Palau", "PLW"),
    ("Palestine, State of", "PSE"),
    ("Panama", "PAN"),
    ("Papua New Guinea", "PNG"),
    ("Paraguay", "PRY"),
    ("Peru", "PER"),
    ("Philippines", "PHL"),
    ("Pitcairn", "PCN"),
    ("Poland", "POL"),
    ("Portugal", "PRT"),
    ("Puerto Rico", "PRI"),
    ("Qatar", "QAT"),
    ("Réunion", "REU"),
    ("Romania", "ROU"),
    ("Russian Federation", "RUS"),
    ("Rwanda", "RWA"),
    ("Saint Barthélemy", "BLM"),
    ("Saint Helena, Ascension and Tristan da Cunha", "SHN"),
    ("Saint Kitts and Nevis", "KNA"),
    ("Saint Lucia", "LCA"),
    ("Saint Martin (French part)", "MAF"),
    ("Saint Pierre and Miquelon", "SPM"),
    ("Saint Vincent and the Grenadines", "VCT"),
    ("Samoa", "WSM"),
    ("San Marino", "SMR"),
    ("Sao Tome and Principe", "STP"),
    ("Saudi Arabia", "SAU"),
    ("Senegal", "SEN"),
    ("Serbia", "SRB"),
    ("Seychelles", "SYC"),
    ("Sierra Leone", "SLE"),
    ("Singapore", "SGP"),
    ("Sint Maarten (Dutch part)", "SXM"),
    ("Slovakia", "SVK"),
    ("Slovenia", "SVN"),
    ("Solomon Islands", "SLB"),
    ("Somalia", "SOM"),
    ("South Africa", "ZAF"),
    ("South Georgia and the South Sandwich Islands", "SGS"),
    ("South Sudan", "SSD"),
    ("Spain", "ESP"),
    ("Sri Lanka", "LKA"),
    ("Sudan", "SDN"),
    ("Suriname", "SUR"),
    ("Svalbard and Jan Mayen", "SJM"),
    ("Sweden", "SWE"),
    ("Switzerland", "CHE"),
    ("Syrian Arab Republic", "SYR"),
    ("Taiwan, Province of China", "TWN"),
    ("Tajikistan", "TJK"),
    ("Tanzania, United Republic of", "TZA"),
    ("Thailand", "THA"),
    ("Timor-Leste", "TLS"),
    ("Togo", "TGO"),
    ("Tokelau", "TKL"),
    ("Tonga", "TON"),
    ("Trinidad and Tobago", "TTO"),
    ("Tunisia", "TUN"),
    ("Türkiye", "TUR"),
    ("Turkmenistan", "TKM"),
    ("Turks and Caicos Islands", "TCA"),
    ("Tuvalu", "TUV"),
    ("Uganda", "UGA"),
    ("Ukraine", "UKR"),
    ("United Arab Emirates", "ARE"),
    ("United Kingdom of Great Britain and Northern Ireland", "GBR"),
    ("United States of America", "USA"),
    ("United States Minor Outlying Islands", "UMI"),
    ("Uruguay", "URY"),
    ("Uzbekistan", "UZB"),
    ("Vanuatu", "VUT"),
    ("Venezuela, Bolivarian Republic of", "VEN"),
    ("Viet Nam", "VNM"),
    ("Virgin Islands, British", "VGB"),
    ("Virgin Islands, U.S.", "VIR"),
    ("Wallis and Futuna", "WLF"),
    ("Western Sahara", "ESH"),
    ("Yemen", "YEM"),
    ("Zambia", "ZMB"),
    ("Zimbabwe", "ZWE"),
];

/// Trimmed text after the last comma of `location`; the whole trimmed
/// string when there is no comma.
pub fn raw_country_label(location: &str) -> &str {
    location
        .rsplit_once(',')
        .map(|(_, tail)| tail)
        .unwrap_or(location)
        .trim()
}

/// Derive the normalized country for a launch location. Total: every input
/// yields some label.
pub fn country_from_location(location: &str) -> String {
    let raw = raw_country_label(location);
    LOCATION_OVERRIDES
        .iter()
        .find(|(from, _)| *from == raw)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Look up the ISO alpha-3 code for a normalized country label.
///
/// Order: [`CODE_OVERRIDES`], then the ISO short-name table, then the label
/// itself when it already is a known alpha-3 code (e.g. `"USA"`).
pub fn country_code(country: &str) -> Option<&'static str> {
    if let Some((_, code)) = CODE_OVERRIDES.iter().find(|(name, _)| *name == country) {
        return Some(code);
    }
    if let Some((_, code)) = ISO_COUNTRIES.iter().find(|(name, _)| *name == country) {
        return Some(code);
    }
    if let Some((_, code)) = ISO_COUNTRIES.iter().find(|(_, code)| *code == country) {
        return Some(code);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_label_takes_last_segment() {
        assert_eq!(
            raw_country_label("LC-39A, Kennedy Space Center, Florida, USA"),
            "USA"
        );
        assert_eq!(raw_country_label("Tai Rui Barge, Yellow Sea"), "Yellow Sea");
    }

    #[test]
    fn test_raw_label_without_comma() {
        assert_eq!(raw_country_label("  Pacific Ocean "), "Pacific Ocean");
        assert_eq!(raw_country_label(""), "");
    }

    #[test]
    fn test_country_overrides() {
        assert_eq!(
            country_from_location("Site 31/6, Baikonur Cosmodrome, Russia"),
            "Russian Federation"
        );
        assert_eq!(
            country_from_location("LC-48, White Sands Missile Range, New Mexico"),
            "USA"
        );
        assert_eq!(country_from_location("Tai Rui Barge, Yellow Sea"), "China");
        assert_eq!(
            country_from_location("K-407 Submarine, Barents Sea"),
            "Russian Federation"
        );
        assert_eq!(
            country_from_location("Stargazer, Base Aerea de Gando, Gran Canaria"),
            "USA"
        );
        assert_eq!(
            country_from_location("Launch Plateau, Shahrud Missile Test Site"),
            "Iran"
        );
    }

    #[test]
    fn test_country_passthrough() {
        assert_eq!(
            country_from_location("Site 1/5, Baikonur Cosmodrome, Kazakhstan"),
            "Kazakhstan"
        );
        assert_eq!(country_from_location("Pacific Ocean"), "Pacific Ocean");
    }

    #[test]
    fn test_korea_code_overrides() {
        assert_eq!(country_code("North Korea"), Some("PRK"));
        assert_eq!(country_code("South Korea"), Some("KOR"));
    }

    #[test]
    fn test_iso_name_lookup() {
        assert_eq!(country_code("Russian Federation"), Some("RUS"));
        assert_eq!(country_code("Kazakhstan"), Some("KAZ"));
        assert_eq!(country_code("China"), Some("CHN"));
        assert_eq!(country_code("New Zealand"), Some("NZL"));
    }

    #[test]
    fn test_label_that_is_already_a_code() {
        assert_eq!(country_code("USA"), Some("USA"));
    }

    #[test]
    fn test_lookup_miss_yields_none() {
        assert_eq!(country_code("Iran"), None);
        assert_eq!(country_code("Pacific Ocean"), None);
        assert_eq!(country_code(""), None);
    }
}
