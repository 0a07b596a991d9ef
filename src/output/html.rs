//! HTML page shown to visitors.

use crate::models::CfMetadata;
use crate::processing::Lookup;

const TITLE: &str = "Starlink IP Geolocation &amp; Point of Presence (PoP)";

const STYLE: &str = r#"
        body {
            padding: 6em;
            font-family: sans-serif;
            display: flex;
            flex-direction: column;
            margin: 0;
        }
        h1 {
            color: #f6821f;
        }
        .content {
            flex: 1;
        }
        .footer {
            text-align: left;
            font-style: italic;
            font-size: 0.8em;
        }
"#;

const FOOTER: &str = "<p>This website is not affiliated with, endorsed by, or in any way connected to \
Starlink, SpaceX Inc., or any of their subsidiaries.<br>The information on this website is provided \
as-is and is not guaranteed to be accurate.</p>";

/// What the classification step produced for the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// No client address was available.
    NoAddress,
    /// The client address could not be parsed.
    InvalidAddress(String),
    Lookup(Lookup),
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn paragraph(label: &str, value: Option<&str>) -> String {
    format!(
        "<p> {label}: {} </p>\n",
        escape_html(value.unwrap_or("unknown"))
    )
}

/// Render the connection page for one visitor.
pub fn render_page(outcome: &PageOutcome, cf: &CfMetadata) -> String {
    let mut content = String::from("<p> Information about your connection </p>\n");

    match outcome {
        PageOutcome::NoAddress => {
            content.push_str(&paragraph("IP address", None));
        }
        PageOutcome::InvalidAddress(text) => {
            content.push_str(&paragraph("IP address", Some(text.as_str())));
            content.push_str("<p> This does not look like a valid IP address </p>\n");
        }
        PageOutcome::Lookup(lookup) => {
            content.push_str(&paragraph("IP address", lookup.client.as_deref()));
            if lookup.matched {
                content.push_str(&paragraph(
                    "You are probably associated with the Starlink PoP",
                    lookup.pop_city.as_deref(),
                ));
                content.push_str(&paragraph(
                    "Your hostname seems to be",
                    lookup.annotation.as_deref(),
                ));
            } else {
                content.push_str("<p> You are probably not using Starlink </p>\n");
            }
        }
    }

    content.push_str(&paragraph("HTTP protocol", cf.http_protocol.as_deref()));
    content.push_str("<hr><p> Information about your location (by Cloudflare) </p>\n");
    content.push_str(&paragraph("Continent", cf.continent.as_deref()));
    content.push_str(&paragraph("Country", cf.country.as_deref()));
    content.push_str(&paragraph("City", cf.city.as_deref()));
    content.push_str(&paragraph("Region", cf.region.as_deref()));
    content.push_str(&paragraph("Region code", cf.region_code.as_deref()));
    content.push_str(&paragraph("Timezone", cf.timezone.as_deref()));

    layout(&content)
}

/// Render a page for a failure to load the dataset.
pub fn render_error_page(message: &str) -> String {
    layout(&format!(
        "<p> The Starlink range data could not be loaded, please try again later. </p>\n<p> {} </p>\n",
        escape_html(message)
    ))
}

fn layout(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{TITLE}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="content">
        <h1>{TITLE}</h1>
        {content}
    </div>
    <div class="footer">
    {FOOTER}
    </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_render_match() {
        let lookup = Lookup {
            client: Some("203.0.113.10".to_string()),
            matched: true,
            annotation: Some("pop1.sjc.starlinkisp.net".to_string()),
            pop_code: Some("sjc".to_string()),
            pop_city: Some("San Jose".to_string()),
            location: None,
        };
        let cf = CfMetadata {
            country: Some("US".to_string()),
            ..Default::default()
        };
        let html = render_page(&PageOutcome::Lookup(lookup), &cf);
        assert!(html.contains("<p> IP address: 203.0.113.10 </p>"));
        assert!(html.contains("Starlink PoP: San Jose"));
        assert!(html.contains("hostname seems to be: pop1.sjc.starlinkisp.net"));
        assert!(html.contains("<p> Country: US </p>"));
        assert!(html.contains("<p> Timezone: unknown </p>"));
    }

    #[test]
    fn test_render_no_match() {
        let lookup = Lookup {
            client: Some("8.8.8.8".to_string()),
            ..Default::default()
        };
        let html = render_page(&PageOutcome::Lookup(lookup), &CfMetadata::default());
        assert!(html.contains("You are probably not using Starlink"));
        assert!(!html.contains("Starlink PoP:"));
    }

    #[test]
    fn test_render_invalid_address_is_escaped() {
        let html = render_page(
            &PageOutcome::InvalidAddress("<b>1.2.3</b>".to_string()),
            &CfMetadata::default(),
        );
        assert!(html.contains("&lt;b&gt;1.2.3&lt;/b&gt;"));
        assert!(html.contains("does not look like a valid IP address"));
    }

    #[test]
    fn test_render_error_page() {
        let html = render_error_page("timeout");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("could not be loaded"));
    }
}
