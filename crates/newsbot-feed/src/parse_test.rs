use super::*;

const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>The Kathmandu Post</title>
    <link>https://kathmandupost.com</link>
    <item>
      <title>Monsoon rains   disrupt highways</title>
      <link>https://kathmandupost.com/national/2026/07/01/monsoon</link>
      <description><![CDATA[<p>Landslides blocked <b>several</b>&nbsp;roads.</p>]]></description>
      <pubDate>Wed, 01 Jul 2026 08:00:00 +0545</pubDate>
    </item>
    <item>
      <title>Budget session begins</title>
      <link>https://kathmandupost.com/politics/2026/07/02/budget</link>
      <description>&lt;p&gt;Parliament convenes &amp;amp; debates.&lt;/p&gt;</description>
      <pubDate>Thu, 02 Jul 2026 09:30:00 +0545</pubDate>
    </item>
  </channel>
</rss>"#;

fn rss_with_items(items: &[(&str, &str)]) -> String {
    let body: String = items
        .iter()
        .map(|(title, link)| format!("<item><title>{title}</title><link>{link}</link></item>"))
        .collect();
    format!("<rss><channel>{body}</channel></rss>")
}

#[test]
fn parses_items_and_cleans_every_field() {
    let items = parse_feed(SAMPLE_RSS, 30).expect("should parse valid RSS");
    assert_eq!(items.len(), 2);

    assert_eq!(items[0].title, "Monsoon rains disrupt highways");
    assert_eq!(
        items[0].link,
        "https://kathmandupost.com/national/2026/07/01/monsoon"
    );
    assert_eq!(items[0].description, "Landslides blocked several roads.");
    assert_eq!(items[0].published_at, "Wed, 01 Jul 2026 08:00:00 +0545");

    assert_eq!(items[1].title, "Budget session begins");
    assert_eq!(items[1].description, "Parliament convenes & debates.");
}

#[test]
fn channel_level_title_and_link_are_not_items() {
    let items = parse_feed(SAMPLE_RSS, 30).unwrap();
    assert!(items.iter().all(|i| i.title != "The Kathmandu Post"));
}

#[test]
fn missing_optional_fields_default_to_empty() {
    let xml = "<rss><channel><item><title>T</title><link>https://a/1</link></item></channel></rss>";
    let items = parse_feed(xml, 30).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].description, "");
    assert_eq!(items[0].published_at, "");
}

#[test]
fn self_closing_fields_are_empty() {
    let xml = "<rss><item><title>T</title><link>https://a/1</link><description/></item></rss>";
    let items = parse_feed(xml, 30).unwrap();
    assert_eq!(items[0].description, "");
}

#[test]
fn items_without_title_or_link_are_dropped() {
    let xml = r"<rss><channel>
        <item><title>No link</title></item>
        <item><link>https://a/no-title</link></item>
        <item><title><![CDATA[<b> </b>]]></title><link>https://a/blank-title</link></item>
        <item><title>Blank link</title><link>   </link></item>
        <item/>
        <item><title>Keeper</title><link>https://a/keep</link></item>
    </channel></rss>";
    let items = parse_feed(xml, 30).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Keeper");
    assert_eq!(items[0].link, "https://a/keep");
}

#[test]
fn max_items_keeps_first_entries_in_feed_order() {
    let xml = rss_with_items(&[
        ("One", "https://a/1"),
        ("Two", "https://a/2"),
        ("Three", "https://a/3"),
        ("Four", "https://a/4"),
        ("Five", "https://a/5"),
    ]);
    let items = parse_feed(&xml, 2).unwrap();
    let links: Vec<&str> = items.iter().map(|i| i.link.as_str()).collect();
    assert_eq!(links, ["https://a/1", "https://a/2"]);
}

#[test]
fn max_items_counts_only_surviving_items() {
    let xml = rss_with_items(&[
        ("", "https://a/dropped"),
        ("Two", "https://a/2"),
        ("Three", "https://a/3"),
        ("Four", "https://a/4"),
    ]);
    let items = parse_feed(&xml, 2).unwrap();
    let links: Vec<&str> = items.iter().map(|i| i.link.as_str()).collect();
    assert_eq!(links, ["https://a/2", "https://a/3"]);
}

#[test]
fn max_items_zero_returns_nothing() {
    let xml = rss_with_items(&[("One", "https://a/1")]);
    assert!(parse_feed(&xml, 0).unwrap().is_empty());
}

#[test]
fn empty_channel_returns_empty_vec() {
    let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
    let items = parse_feed(xml, 30).expect("should parse empty RSS");
    assert!(items.is_empty());
}

#[test]
fn only_first_field_occurrence_is_used() {
    let xml = "<rss><item><title>First</title><title>Second</title><link>https://a/1</link></item></rss>";
    let items = parse_feed(xml, 30).unwrap();
    assert_eq!(items[0].title, "First");
}

#[test]
fn field_value_stops_at_first_nested_element() {
    let xml = "<rss><item><title>Lead <b>bold</b> tail</title><link>https://a/1</link></item></rss>";
    let items = parse_feed(xml, 30).unwrap();
    assert_eq!(items[0].title, "Lead");
}

#[test]
fn grandchild_fields_are_ignored() {
    let xml = "<rss><item><media><title>Caption</title></media><title>Real</title><link>https://a/1</link></item></rss>";
    let items = parse_feed(xml, 30).unwrap();
    assert_eq!(items[0].title, "Real");
}

#[test]
fn text_and_cdata_are_concatenated() {
    let xml = "<rss><item><title>Hello <![CDATA[World]]></title><link>https://a/1</link></item></rss>";
    let items = parse_feed(xml, 30).unwrap();
    assert_eq!(items[0].title, "Hello World");
}

#[test]
fn items_outside_channel_are_found() {
    let xml = "<rdf><item><title>T</title><link>https://a/1</link></item></rdf>";
    assert_eq!(parse_feed(xml, 30).unwrap().len(), 1);
}

#[test]
fn unclosed_document_is_rejected() {
    let result = parse_feed("<rss><channel><item><title>Unclosed", 30);
    assert!(result.is_err(), "expected ParseError, got: {result:?}");
}

#[test]
fn mismatched_end_tag_is_rejected() {
    let result = parse_feed("<rss><channel></item></channel></rss>", 30);
    assert!(result.is_err(), "expected ParseError, got: {result:?}");
}

#[test]
fn empty_input_is_rejected() {
    let result = parse_feed("", 30);
    assert!(
        matches!(result, Err(ParseError::Malformed { .. })),
        "expected Malformed, got: {result:?}"
    );
}

#[test]
fn plain_text_is_rejected() {
    let result = parse_feed("Service Unavailable", 30);
    assert!(
        matches!(result, Err(ParseError::Malformed { .. })),
        "expected Malformed, got: {result:?}"
    );
}

#[test]
fn second_root_element_is_rejected() {
    let result = parse_feed("<rss></rss><rss></rss>", 30);
    assert!(
        matches!(result, Err(ParseError::Malformed { .. })),
        "expected Malformed, got: {result:?}"
    );
}

#[test]
fn undeclared_entity_is_rejected() {
    let xml = "<rss><item><title>A&nbsp;B</title><link>https://a/1</link></item></rss>";
    let result = parse_feed(xml, 30);
    assert!(result.is_err(), "expected ParseError, got: {result:?}");
}

#[test]
fn malformed_item_after_valid_items_rejects_whole_feed() {
    let xml = "<rss><item><title>Ok</title><link>https://a/1</link></item><item><title>Bad</link></item></rss>";
    let result = parse_feed(xml, 1);
    assert!(result.is_err(), "expected ParseError, got: {result:?}");
}

#[test]
fn well_formed_attributes_are_accepted() {
    let xml = r#"<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/"><item id='x' dc:kind="a &amp; b"><title>T</title><link>https://a/1</link></item></rss>"#;
    assert_eq!(parse_feed(xml, 30).unwrap().len(), 1);
}

#[test]
fn unquoted_attribute_value_is_rejected() {
    let xml = "<rss><item a=1><title>T</title><link>https://a/1</link></item></rss>";
    let result = parse_feed(xml, 30);
    assert!(result.is_err(), "expected ParseError, got: {result:?}");
}

#[test]
fn attribute_without_value_is_rejected() {
    let xml = "<rss><item junk><title>T</title><link>https://a/1</link></item></rss>";
    let result = parse_feed(xml, 30);
    assert!(result.is_err(), "expected ParseError, got: {result:?}");
}

#[test]
fn duplicate_attribute_is_rejected() {
    let xml = r#"<rss><item a="1" a="2"><title>T</title><link>https://a/1</link></item></rss>"#;
    let result = parse_feed(xml, 30);
    assert!(
        matches!(result, Err(ParseError::Xml { .. })),
        "expected Xml error, got: {result:?}"
    );
}

#[test]
fn attribute_on_self_closing_tag_is_checked() {
    let xml = "<rss><item><title>T</title><link>https://a/1</link><enclosure url=x/></item></rss>";
    let result = parse_feed(xml, 30);
    assert!(result.is_err(), "expected ParseError, got: {result:?}");
}

#[test]
fn element_name_starting_with_digit_is_rejected() {
    let xml = "<rss><1item><title>T</title></1item></rss>";
    let result = parse_feed(xml, 30);
    assert!(
        matches!(result, Err(ParseError::Malformed { .. })),
        "expected Malformed, got: {result:?}"
    );
}

#[test]
fn malformed_error_reports_byte_position_of_offending_element() {
    let xml = "<rss></rss><extra/>";
    let err = parse_feed(xml, 30).unwrap_err();
    match err {
        ParseError::Malformed { position, .. } => {
            assert!(position > 11 && position <= xml.len() as u64, "position {position}");
        }
        other => panic!("expected Malformed, got {other:?}"),
    }
}
