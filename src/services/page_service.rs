use crate::models::news::WARNING_GLYPH;
use crate::models::snapshot::{SnapshotOptions, Variant};

/// Minimal HTML escaping for user-supplied and model-supplied text.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "\
            body { font-family: Arial, sans-serif; text-align: center; margin: 40px; background-color: #fafafa; }\n\
            img { border-radius: 12px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); margin-top: 20px; }\n\
            p { width: 80%; margin: 20px auto; line-height: 1.6; font-size: 16px; text-align: justify; }\n\
            .warning { color: gray; font-style: italic; font-size: 14px; }\n\
            input, button { font-size: 16px; padding: 6px; margin: 4px; border-radius: 6px; border: 1px solid #ccc; }\n\
            button { background-color: #007bff; color: white; cursor: pointer; }";

fn ticker_form(options: &SnapshotOptions, current: Option<&str>) -> String {
    // The path variant navigates by path segment, so its form posts back
    // to the root route instead of the current URL.
    let action = match options.variant {
        Variant::PathBased => " action=\"/\"",
        _ => "",
    };
    let value = match current {
        Some(ticker) if options.prefill_form => format!(" value=\"{}\"", escape_html(ticker)),
        _ => String::new(),
    };
    format!(
        "<form method=\"get\"{action}>\n\
         <input type=\"text\" name=\"{param}\" placeholder=\"Enter ticker (e.g. AAPL)\"{value} />\n\
         <button type=\"submit\">Go</button>\n\
         </form>",
        param = options.ticker_param,
    )
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<html>\n\
         <head>\n\
         <title>{title}</title>\n\
         <style>\n{STYLE}\n</style>\n\
         </head>\n\
         <body>\n\
         {body}\n\
         </body>\n\
         </html>"
    )
}

/// Full snapshot page: heading, form, chart image, commentary, and the
/// warning paragraph when the news result is a glyph-prefixed advisory.
pub fn snapshot_page(
    options: &SnapshotOptions,
    ticker: &str,
    chart_base64: &str,
    commentary: &str,
    advisory: Option<&str>,
) -> String {
    let heading = escape_html(ticker);
    let warning = advisory
        .filter(|text| text.starts_with(WARNING_GLYPH))
        .map(|text| format!("\n<p class='warning'>{}</p>", escape_html(text)))
        .unwrap_or_default();

    let body = format!(
        "<h2>{heading} Stock Snapshot</h2>\n\
         {form}\n\
         <img src=\"data:image/png;base64,{chart_base64}\" alt=\"Stock Chart\" width=\"500\"/>\n\
         <p><b>Market Recap:</b> {commentary}</p>{warning}",
        form = ticker_form(options, Some(ticker)),
        commentary = escape_html(commentary),
    );

    document(&format!("{heading} Stock Snapshot"), &body)
}

/// Reduced page for the empty-state and no-data cases: form plus a status
/// line, no chart.
pub fn status_page(options: &SnapshotOptions, current: Option<&str>, message: &str) -> String {
    let heading = match current {
        Some(ticker) => format!("{} Stock Snapshot", escape_html(ticker)),
        None => "Stock Snapshot".to_string(),
    };
    let body = format!(
        "<h2>{heading}</h2>\n\
         {form}\n\
         <p>{message}</p>",
        form = ticker_form(options, current),
        message = escape_html(message),
    );
    document(&heading, &body)
}

/// The 30-day variant's minimal no-data response body.
pub fn no_data_fragment(ticker: &str) -> String {
    format!("<h3>No stock data found for {}</h3>", escape_html(ticker))
}
