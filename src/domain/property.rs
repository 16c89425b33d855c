// src/domain/property.rs

use crate::domain::node::{as_list, attr, numeric, text, text_or_attr};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// A listing flattened out of the feed, in the shape the search page reads.
///
/// Field order is the JSON key order. Optional fields are left out of the
/// JSON entirely when empty rather than written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: i64,
    pub address: String,
    pub town: String,
    pub postcode: String,

    // NaN when the feed has junk here; serde_json writes that as null
    #[serde(deserialize_with = "nan_if_null")]
    pub lat: f64,
    #[serde(deserialize_with = "nan_if_null")]
    pub lon: f64,

    pub types: Vec<String>,
    pub to_let: bool,
    pub for_sale: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_from_sqft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_to_sqft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub features: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent_psf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_rates_psf: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rateable_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_charge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estate_charge: Option<String>,

    pub epc_rating: String,
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brochure_url: Option<String>,

    pub contacts: Vec<Contact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub company: String,
}

impl Contact {
    fn from_node(node: &Value) -> Self {
        let field = |name: &str| text(node.get(name));

        let mut name = field("name");
        if name.is_empty() {
            name = [field("forename"), field("surname")]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
        }

        Contact {
            name,
            email: field("email"),
            phone: field("phone"),
            mobile: field("mobile"),
            company: field("company"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.phone.is_empty()
            && self.mobile.is_empty()
            && self.company.is_empty()
    }
}

impl PropertyRecord {
    /// Builds a record from one `<property>` node. Never fails: anything
    /// missing or oddly shaped becomes an empty/absent value.
    ///
    /// `position` is the node's 1-based place in the feed, used as the id
    /// when neither `id` nor `object_id` is a whole number.
    pub fn from_node(node: &Value, position: usize) -> Self {
        let get = |name: &str| node.get(name);
        let non_empty = |s: String| Some(s).filter(|s| !s.is_empty());

        let id = whole_number(get("id"))
            .or_else(|| whole_number(get("object_id")))
            .unwrap_or(position as i64);

        let (to_let, for_sale) = availability(node);
        let rent = text(get("rent"));

        PropertyRecord {
            id,
            address: text(get("address1")),
            town: text(get("town")),
            postcode: text(get("postcode")),
            lat: numeric(get("lat")).unwrap_or(f64::NAN),
            lon: numeric(get("lon")).unwrap_or(f64::NAN),
            types: as_list(get("types").and_then(|t| t.get("type")))
                .into_iter()
                .map(|item| text(Some(item)))
                .collect(),
            to_let,
            for_sale,
            size_from_sqft: numeric(get("size_from_sqft")),
            size_to_sqft: numeric(get("size_to_sqft")),
            summary: non_empty(text(get("specification_summary"))),
            description: non_empty(text(get("specification_description"))),
            features: child_texts(node, "features", "feature"),
            rent_psf: numeric(get("rent")),
            rent: non_empty(rent),
            business_rates_psf: numeric(get("business_rates")),
            rateable_value: numeric(get("rateable_value")),
            service_charge: non_empty(text(get("service_charge"))),
            estate_charge: non_empty(text(get("estate_charge"))),
            epc_rating: epc_rating(node),
            images: images(node),
            brochure_url: brochure_url(node),
            contacts: contacts(node),
            last_updated: non_empty(text(get("last_updated")))
                .or_else(|| non_empty(text(get("created_at")))),
        }
    }
}

/// A plain non-negative integer, so ids like "ABC-123" or "12.7" fall through.
fn whole_number(node: Option<&Value>) -> Option<i64> {
    text(node)
        .parse::<u64>()
        .ok()
        .and_then(|n| i64::try_from(n).ok())
}

/// `<parent><child>..</child>...</parent>` → the non-empty child texts.
fn child_texts(node: &Value, parent: &str, child: &str) -> Vec<String> {
    as_list(node.get(parent).and_then(|p| p.get(child)))
        .into_iter()
        .map(|item| text(Some(item)))
        .filter(|s| !s.is_empty())
        .collect()
}

/// (to_let, for_sale) from `availabilities/type`. Feeds send either
/// `<type id="tolet"/>` or `<type>To Let</type>`, so both the id attribute
/// and the text are checked.
fn availability(node: &Value) -> (bool, bool) {
    let tags: Vec<String> = as_list(node.get("availabilities").and_then(|a| a.get("type")))
        .into_iter()
        .map(|item| {
            format!("{} {}", attr(Some(item), "id"), text(Some(item)))
                .trim()
                .to_lowercase()
        })
        .filter(|tag| !tag.is_empty())
        .collect();

    let any = |needles: &[&str]| {
        tags.iter()
            .any(|tag| needles.iter().any(|needle| tag.contains(needle)))
    };

    (any(&["to let", "tolet"]), any(&["for sale", "forsale"]))
}

/// First `<epc>` only: "C (62)", "C", "(62)" or "". A bare `<epc>C</epc>`
/// is taken as the grade.
fn epc_rating(node: &Value) -> String {
    let first = as_list(node.get("epc")).into_iter().next();

    let mut grade = text_or_attr(first, "rating");
    if grade.is_empty() && first.is_some_and(Value::is_string) {
        grade = text(first);
    }
    let value = text_or_attr(first, "value");

    if value.is_empty() {
        grade
    } else {
        format!("{grade} ({value})").trim().to_string()
    }
}

/// Image URLs in feed order, without repeats or blanks. An `<image>` is
/// either the URL itself or wraps a `<url>`.
fn images(node: &Value) -> Vec<String> {
    let mut seen = HashSet::new();

    as_list(node.get("images").and_then(|i| i.get("image")))
        .into_iter()
        .map(|item| {
            let direct = text(Some(item));
            if direct.is_empty() {
                text(item.get("url"))
            } else {
                direct
            }
        })
        .filter(|url| !url.is_empty() && seen.insert(url.clone()))
        .collect()
}

fn brochure_url(node: &Value) -> Option<String> {
    as_list(node.get("files").and_then(|f| f.get("file")))
        .into_iter()
        .map(|file| text(file.get("url")))
        .find(|url| !url.is_empty())
}

fn contacts(node: &Value) -> Vec<Contact> {
    as_list(node.get("contacts").and_then(|c| c.get("contact")))
        .into_iter()
        .map(Contact::from_node)
        .filter(|contact| !contact.is_empty())
        .collect()
}

fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}
