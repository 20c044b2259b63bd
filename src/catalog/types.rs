use serde::{Deserialize, Serialize};

/// A country as the rest of the app sees it. Read-only after decoding.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 alpha-3 code, unique per country (e.g. "FRA").
    pub code: String,
    pub common_name: String,
    pub population: u64,
    pub region: String,
    #[serde(default)]
    pub capitals: Vec<String>,
    #[serde(default)]
    pub flag_image_url: String,
}

impl Country {
    /// First listed capital, if the country has any.
    pub fn capital(&self) -> Option<&str> {
        self.capitals.first().map(String::as_str)
    }
}

// ============================================================================
// REST Countries wire format
// ============================================================================

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ApiName {
    #[serde(default)]
    pub common: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ApiFlags {
    #[serde(default)]
    pub svg: String,
}

/// One record of the `/v3.1/all` response. Only the fields we read are declared;
/// everything else in the payload is ignored.
#[derive(Deserialize, Debug, Clone)]
pub struct ApiCountry {
    pub cca3: String,
    #[serde(default)]
    pub name: ApiName,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub flags: ApiFlags,
}

impl From<ApiCountry> for Country {
    fn from(api: ApiCountry) -> Self {
        Country {
            code: api.cca3,
            common_name: api.name.common,
            population: api.population,
            region: api.region,
            capitals: api.capital,
            flag_image_url: api.flags.svg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_country_full_record() {
        let json = r#"{
            "cca3": "FRA",
            "name": { "common": "France", "official": "French Republic" },
            "population": 67391582,
            "region": "Europe",
            "capital": ["Paris"],
            "flags": { "svg": "https://flagcdn.com/fr.svg", "png": "https://flagcdn.com/w320/fr.png" }
        }"#;
        let api: ApiCountry = serde_json::from_str(json).unwrap();
        let country = Country::from(api);
        assert_eq!(country.code, "FRA");
        assert_eq!(country.common_name, "France");
        assert_eq!(country.population, 67391582);
        assert_eq!(country.region, "Europe");
        assert_eq!(country.capital(), Some("Paris"));
        assert_eq!(country.flag_image_url, "https://flagcdn.com/fr.svg");
    }

    #[test]
    fn test_api_country_missing_optional_fields() {
        // Antarctica-style record: no capital, no population
        let json = r#"{ "cca3": "ATA", "name": { "common": "Antarctica" }, "region": "Antarctic" }"#;
        let country = Country::from(serde_json::from_str::<ApiCountry>(json).unwrap());
        assert_eq!(country.population, 0);
        assert!(country.capitals.is_empty());
        assert_eq!(country.capital(), None);
        assert_eq!(country.flag_image_url, "");
    }

    #[test]
    fn test_country_serializes_camel_case() {
        let country = Country {
            code: "JPN".to_string(),
            common_name: "Japan".to_string(),
            population: 125836021,
            region: "Asia".to_string(),
            capitals: vec!["Tokyo".to_string()],
            flag_image_url: "https://flagcdn.com/jp.svg".to_string(),
        };
        let value = serde_json::to_value(&country).unwrap();
        assert_eq!(value["commonName"], "Japan");
        assert_eq!(value["flagImageUrl"], "https://flagcdn.com/jp.svg");
        assert_eq!(value["capitals"][0], "Tokyo");
    }
}
