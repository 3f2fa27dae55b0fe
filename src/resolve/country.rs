//! ISO country code to display label mapping.
//!
//! Resolution precedence for a code: the built-in Chinese-name table
//! (covering the countries edge nodes actually show up in), then the full
//! English-name table, then the raw code itself. Both backends funnel their
//! ISO codes through [`display_label`] so cache entries and output lines are
//! consistent regardless of which backend answered.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Chinese display names for common / cloud-node countries.
const COUNTRY_ZH: &[(&str, &str)] = &[
    ("US", "美国"), ("CA", "加拿大"), ("GB", "英国"), ("DE", "德国"), ("FR", "法国"),
    ("SG", "新加坡"), ("JP", "日本"), ("KR", "韩国"), ("CN", "中国"), ("NL", "荷兰"),
    ("SE", "瑞典"), ("CH", "瑞士"), ("AU", "澳大利亚"), ("RU", "俄罗斯"), ("IN", "印度"),
    ("BR", "巴西"), ("ZA", "南非"), ("HK", "香港"), ("TW", "台湾"), ("BE", "比利时"),
    ("IT", "意大利"), ("ES", "西班牙"), ("PL", "波兰"), ("AT", "奥地利"), ("NO", "挪威"),
    ("DK", "丹麦"), ("FI", "芬兰"), ("IE", "爱尔兰"), ("CZ", "捷克"), ("TR", "土耳其"),
    ("MX", "墨西哥"), ("CO", "哥伦比亚"), ("AR", "阿根廷"), ("IL", "以色列"), ("AE", "阿联酋"),
    ("SA", "沙特阿拉伯"), ("VN", "越南"), ("TH", "泰国"), ("MY", "马来西亚"), ("ID", "印度尼西亚"),
    ("PH", "菲律宾"), ("PT", "葡萄牙"), ("GR", "希腊"), ("HU", "匈牙利"), ("RO", "罗马尼亚"),
    ("BG", "保加利亚"), ("SI", "斯洛文尼亚"), ("SK", "斯洛伐克"), ("HR", "克罗地亚"), ("EE", "爱沙尼亚"),
    ("LV", "拉脱维亚"), ("LT", "立陶宛"), ("LU", "卢森堡"), ("IS", "冰岛"), ("NZ", "新西兰"),
    ("CL", "智利"), ("PE", "秘鲁"), ("UY", "乌拉圭"), ("CR", "哥斯达黎加"), ("DO", "多米尼加"),
    ("PA", "巴拿马"), ("PR", "波多黎各"), ("NG", "尼日利亚"), ("KE", "肯尼亚"), ("EG", "埃及"),
    ("CI", "科特迪瓦"), ("TZ", "坦桑尼亚"), ("PK", "巴基斯坦"),
];

/// English fallback names for codes outside the Chinese table.
const COUNTRY_EN: &[(&str, &str)] = &[
    ("AD", "Andorra"), ("AF", "Afghanistan"), ("AG", "Antigua and Barbuda"), ("AL", "Albania"),
    ("AM", "Armenia"), ("AO", "Angola"), ("AZ", "Azerbaijan"), ("BA", "Bosnia and Herzegovina"),
    ("BB", "Barbados"), ("BD", "Bangladesh"), ("BF", "Burkina Faso"), ("BH", "Bahrain"),
    ("BI", "Burundi"), ("BJ", "Benin"), ("BM", "Bermuda"), ("BN", "Brunei"),
    ("BO", "Bolivia"), ("BS", "Bahamas"), ("BT", "Bhutan"), ("BW", "Botswana"),
    ("BY", "Belarus"), ("BZ", "Belize"), ("CD", "DR Congo"), ("CF", "Central African Republic"),
    ("CG", "Congo"), ("CM", "Cameroon"), ("CU", "Cuba"), ("CV", "Cabo Verde"),
    ("CY", "Cyprus"), ("DJ", "Djibouti"), ("DZ", "Algeria"), ("EC", "Ecuador"),
    ("ER", "Eritrea"), ("ET", "Ethiopia"), ("FJ", "Fiji"), ("FO", "Faroe Islands"),
    ("GA", "Gabon"), ("GD", "Grenada"), ("GE", "Georgia"), ("GH", "Ghana"),
    ("GI", "Gibraltar"), ("GL", "Greenland"), ("GM", "Gambia"), ("GN", "Guinea"),
    ("GQ", "Equatorial Guinea"), ("GT", "Guatemala"), ("GU", "Guam"), ("GW", "Guinea-Bissau"),
    ("GY", "Guyana"), ("HN", "Honduras"), ("HT", "Haiti"), ("IQ", "Iraq"),
    ("IR", "Iran"), ("JM", "Jamaica"), ("JO", "Jordan"), ("KG", "Kyrgyzstan"),
    ("KH", "Cambodia"), ("KM", "Comoros"), ("KP", "North Korea"), ("KW", "Kuwait"),
    ("KY", "Cayman Islands"), ("KZ", "Kazakhstan"), ("LA", "Laos"), ("LB", "Lebanon"),
    ("LI", "Liechtenstein"), ("LK", "Sri Lanka"), ("LR", "Liberia"), ("LS", "Lesotho"),
    ("LY", "Libya"), ("MA", "Morocco"), ("MC", "Monaco"), ("MD", "Moldova"),
    ("ME", "Montenegro"), ("MG", "Madagascar"), ("MK", "North Macedonia"), ("ML", "Mali"),
    ("MM", "Myanmar"), ("MN", "Mongolia"), ("MO", "Macao"), ("MR", "Mauritania"),
    ("MT", "Malta"), ("MU", "Mauritius"), ("MV", "Maldives"), ("MW", "Malawi"),
    ("MZ", "Mozambique"), ("NA", "Namibia"), ("NE", "Niger"), ("NI", "Nicaragua"),
    ("NP", "Nepal"), ("OM", "Oman"), ("PG", "Papua New Guinea"), ("PS", "Palestine"),
    ("PY", "Paraguay"), ("QA", "Qatar"), ("RS", "Serbia"), ("RW", "Rwanda"),
    ("SB", "Solomon Islands"), ("SC", "Seychelles"), ("SD", "Sudan"), ("SL", "Sierra Leone"),
    ("SM", "San Marino"), ("SN", "Senegal"), ("SO", "Somalia"), ("SR", "Suriname"),
    ("SS", "South Sudan"), ("SV", "El Salvador"), ("SY", "Syria"), ("SZ", "Eswatini"),
    ("TD", "Chad"), ("TG", "Togo"), ("TJ", "Tajikistan"), ("TL", "Timor-Leste"),
    ("TM", "Turkmenistan"), ("TN", "Tunisia"), ("TT", "Trinidad and Tobago"), ("UA", "Ukraine"),
    ("UG", "Uganda"), ("UZ", "Uzbekistan"), ("VE", "Venezuela"), ("VU", "Vanuatu"),
    ("WS", "Samoa"), ("YE", "Yemen"), ("ZM", "Zambia"), ("ZW", "Zimbabwe"),
];

static ZH_BY_CODE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COUNTRY_ZH.iter().copied().collect());

static EN_BY_CODE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COUNTRY_EN.iter().copied().collect());

/// Maps an ISO 3166-1 alpha-2 code to its display label.
///
/// Falls back from the Chinese table to the English table to the uppercased
/// raw code, so every resolved address gets a usable grouping key.
pub fn display_label(iso_code: &str) -> String {
    let code = iso_code.trim().to_uppercase();
    if let Some(name) = ZH_BY_CODE.get(code.as_str()) {
        return (*name).to_string();
    }
    if let Some(name) = EN_BY_CODE.get(code.as_str()) {
        return (*name).to_string();
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_table_hit() {
        assert_eq!(display_label("US"), "美国");
        assert_eq!(display_label("JP"), "日本");
    }

    #[test]
    fn test_lowercase_codes_normalized() {
        assert_eq!(display_label("us"), "美国");
    }

    #[test]
    fn test_english_fallback() {
        assert_eq!(display_label("UA"), "Ukraine");
        assert_eq!(display_label("RS"), "Serbia");
    }

    #[test]
    fn test_raw_code_fallback() {
        // XK (Kosovo) is in neither table; the code itself is the label.
        assert_eq!(display_label("xk"), "XK");
    }
}
