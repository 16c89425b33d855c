use crate::domain::{normalize_feed, PropertyRecord};
use crate::feed::parse_tree;

/// Wraps `<property>` bodies in a `<properties>` document.
pub fn feed_xml(properties: &[&str]) -> String {
    let body: String = properties
        .iter()
        .map(|p| format!("<property>{p}</property>"))
        .collect();
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><properties>{body}</properties>"#)
}

/// Runs the feed through the parser and normalizer.
pub fn normalize(properties: &[&str]) -> Vec<PropertyRecord> {
    let tree = parse_tree(&feed_xml(properties))
        .unwrap_or_else(|e| panic!("fixture should parse: {e}"));
    normalize_feed(&tree).records
}

/// A single fully-populated listing, roughly as the live feed sends it.
pub const FULL_PROPERTY: &str = r#"
    <id>1042</id>
    <object_id>99</object_id>
    <status>Available</status>
    <address1> Unit 4, Thorp Arch Estate </address1>
    <town>Wetherby</town>
    <postcode>LS23 7BJ</postcode>
    <lat>53.9091</lat>
    <lon>-1.3420</lon>
    <types><type id="1">Industrial</type><type id="2">Warehouse</type></types>
    <availabilities><type id="tolet">To Let</type></availabilities>
    <size_from_sqft>1,200 sq ft</size_from_sqft>
    <size_to_sqft>4,500</size_to_sqft>
    <specification_summary>Modern unit with yard</specification_summary>
    <specification_description><![CDATA[<p>Steel portal frame.</p>]]></specification_description>
    <features><feature>Roller shutter</feature><feature>3 phase power</feature></features>
    <rent>£8.50 per sq ft</rent>
    <business_rates>£2.10 psf</business_rates>
    <rateable_value>£9,750</rateable_value>
    <service_charge>On application</service_charge>
    <estate_charge>£0.35 psf</estate_charge>
    <epc><rating>C</rating><value>62</value></epc>
    <images>
      <image>https://img.example.com/1.jpg</image>
      <image><url>https://img.example.com/2.jpg</url></image>
      <image>https://img.example.com/1.jpg</image>
    </images>
    <files><file><name>Brochure</name><url>https://files.example.com/b.pdf</url></file></files>
    <contacts>
      <contact><forename>Jo</forename><surname>Bloggs</surname><email>jo@example.com</email></contact>
      <contact><name></name><email></email></contact>
    </contacts>
    <last_updated>2024-05-01T09:30:00Z</last_updated>
"#;
