//! Static fallback dataset, stored in the same raw shape the database returns
//! so it flows through the same normalizer as live records.

use crate::core::normalize::{normalize_record, sort_items};
use crate::domain::model::{ContentItem, Section};
use serde_json::{json, Value};
use std::sync::OnceLock;

fn record(id: &str, title: &str, content: &str, section: &str, order: i64, link: Option<&str>) -> Value {
    let mut properties = json!({
        "Name": {"title": [{"plain_text": title}]},
        "Content": {"rich_text": [{"plain_text": content}]},
        "Section": {"select": {"name": section}},
        "Order": {"number": order},
    });
    if let Some(url) = link {
        properties["Link"] = json!({"url": url});
    }

    json!({
        "object": "page",
        "id": id,
        "properties": properties,
    })
}

/// Raw records of the built-in dataset.
pub fn mock_records() -> &'static [Value] {
    static RECORDS: OnceLock<Vec<Value>> = OnceLock::new();
    RECORDS.get_or_init(|| {
        vec![
            record("1", "Business Data Analysis", "SQL, Tableau, Power BI, Excel", "Skills", 1, None),
            record("2", "Data Engineering", "Python, Apache Spark, AWS, ETL Pipelines", "Skills", 2, None),
            record("3", "Data Science", "Machine Learning, R, Statistics, Deep Learning", "Skills", 3, None),
            record("4", "AWS Certified Data Engineer", "Advanced cloud data solutions & architecture", "Certificates", 1, None),
            record("5", "Google Data Analytics Certificate", "Professional data analysis & visualization", "Certificates", 2, None),
            record("6", "Microsoft Azure Data Scientist", "Machine learning & AI expertise", "Certificates", 3, None),
            record("7", "Tableau Desktop Specialist", "Advanced data visualization techniques", "Certificates", 4, None),
            record("8", "Apache Spark Developer", "Big data processing & analytics", "Certificates", 5, None),
            record("9", "Python Data Science Certification", "Advanced Python for data analysis", "Certificates", 6, None),
            record("10", "E-commerce Analytics Dashboard", "Real-time sales insights with Tableau & SQL", "Projects", 1, None),
            record("11", "Predictive Customer Churn Model", "ML model reducing churn by 25% using Python", "Projects", 2, None),
            record("12", "ETL Pipeline for Financial Data", "Automated data processing with Apache Spark", "Projects", 3, None),
            record("13", "Social Media Sentiment Analysis", "NLP model analyzing customer feedback", "Projects", 4, None),
            record("14", "Supply Chain Optimization", "Data-driven logistics improvement system", "Projects", 5, None),
            record("15", "Healthcare Data Warehouse", "Scalable data architecture on AWS", "Projects", 6, None),
            record("16", "Experience", "5+ years in data analytics and engineering", "About", 1, None),
            record("17", "Education", "MS in Data Science, BS in Statistics", "About", 2, None),
            record("18", "Passion", "Bridging the gap between data and business value", "About", 3, None),
            record("19", "Email", "data.expert@email.com", "Contact", 1, None),
            record("20", "LinkedIn", "linkedin.com/in/dataexpert", "Contact", 2, Some("https://linkedin.com/in/dataexpert")),
            record("21", "GitHub", "github.com/dataexpert", "Contact", 3, Some("https://github.com/dataexpert")),
        ]
    })
}

/// Built-in items for `section` (all sections when `None`), normalized and sorted.
pub fn mock_items(section: Option<Section>) -> Vec<ContentItem> {
    let mut items: Vec<ContentItem> = mock_records()
        .iter()
        .filter(|raw| match section {
            Some(wanted) => raw_section_name(raw) == Some(wanted.as_str()),
            None => true,
        })
        .map(normalize_record)
        .collect();
    sort_items(&mut items);
    items
}

fn raw_section_name(raw: &Value) -> Option<&str> {
    raw.pointer("/properties/Section/select/name")?.as_str()
}
