//! HTML templates for the search page
//!
//! Hand-built fragments; HTMX swaps them in place without a JS framework.

use interchange_form::results::{NOT_FOUND_HINT, NOT_FOUND_MESSAGE, PROMPT_MESSAGE};
use interchange_form::{
    FormError, Page, PartSearch, ResultRow, ResultsView, VehicleField, VehicleSelector,
    COPY_FEEDBACK_DELAY, CUSTOM_PART, CUSTOM_PART_LABEL,
};

pub const APP_TITLE: &str = "Parts Interchange Buddy";
pub const APP_TAGLINE: &str =
    "Cross-reference and find compatible parts across different vehicle years and models";
pub const SEARCH_BUTTON_LABEL: &str = "Search Interchangeable Parts";

/// Form names of the two text inputs, sent along with a search.
pub const CUSTOM_NAME_FIELD: &str = "custom_name";
pub const PART_NUMBER_FIELD: &str = "part_number";

/// CSS styles
pub const STYLE_CSS: &str = r#"
:root {
    --bg-primary: #0b0f17;
    --bg-card: #131a26;
    --bg-input: #1a2333;
    --accent: #3b82f6;
    --accent-dim: #2563eb;
    --text-primary: #e5e7eb;
    --text-secondary: #8b95a7;
    --border: #243044;
    --high: #4ade80;
    --medium: #fbbf24;
    --low: #fb923c;
}

* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    background: var(--bg-primary);
    color: var(--text-primary);
    min-height: 100vh;
    line-height: 1.5;
}

.hero {
    padding: 64px 16px;
    text-align: center;
    background: linear-gradient(90deg, rgba(11,15,23,0.95), rgba(11,15,23,0.6)), #1e293b;
    border-bottom: 1px solid var(--border);
}

.hero h1 {
    font-size: 2.25em;
    font-weight: bold;
}

.hero p {
    color: var(--text-secondary);
    max-width: 40em;
    margin: 12px auto 0;
    font-size: 1.15em;
}

.container {
    max-width: 1100px;
    margin: 0 auto;
    padding: 32px 16px;
    display: flex;
    flex-direction: column;
    gap: 24px;
}

.forms {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
    gap: 24px;
}

.card {
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 10px;
    padding: 24px;
}

.card h2 {
    font-size: 1.25em;
    margin-bottom: 20px;
}

.fields {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
    gap: 16px;
}

.field {
    display: flex;
    flex-direction: column;
    gap: 6px;
    margin-bottom: 16px;
}

.field label {
    font-size: 0.85em;
    color: var(--text-secondary);
}

select, input[type="text"] {
    background: var(--bg-input);
    color: var(--text-primary);
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 8px 10px;
    font-size: 0.95em;
}

select:disabled {
    opacity: 0.5;
}

.search-button {
    width: 100%;
    padding: 10px;
    border: none;
    border-radius: 6px;
    background: var(--accent);
    color: white;
    font-weight: 600;
    cursor: pointer;
}

.search-button:hover {
    background: var(--accent-dim);
}

.search-button:disabled {
    opacity: 0.5;
    cursor: not-allowed;
}

.results-empty {
    text-align: center;
    color: var(--text-secondary);
    padding: 40px;
    font-size: 1.1em;
}

.query-summary {
    font-size: 0.9em;
    color: var(--text-secondary);
    margin-bottom: 20px;
}

.query-summary strong {
    color: var(--text-primary);
}

.badge {
    display: inline-block;
    font-size: 0.75em;
    padding: 2px 8px;
    border-radius: 999px;
    border: 1px solid var(--border);
    margin-left: 8px;
}

.confidence-high { color: var(--high); border-color: var(--high); }
.confidence-medium { color: var(--medium); border-color: var(--medium); }
.confidence-low { color: var(--low); border-color: var(--low); }

.result-count {
    font-size: 0.9em;
    color: var(--text-secondary);
    margin-bottom: 12px;
}

.result-row {
    padding: 16px;
    border: 1px solid var(--border);
    border-radius: 8px;
    margin-bottom: 12px;
}

.result-row h3 {
    font-size: 1em;
    display: inline;
}

.part-number {
    margin-top: 8px;
    font-size: 0.9em;
    color: var(--text-secondary);
}

.part-number code {
    background: var(--bg-input);
    color: var(--accent);
    padding: 2px 6px;
    border-radius: 4px;
}

.copy-button {
    background: none;
    border: 1px solid var(--border);
    border-radius: 4px;
    color: var(--text-secondary);
    font-size: 0.8em;
    padding: 1px 6px;
    margin-left: 6px;
    cursor: pointer;
}

.copy-button.copied {
    color: var(--high);
    border-color: var(--high);
}

.notes {
    margin-top: 8px;
    font-size: 0.8em;
    color: var(--text-secondary);
}

.form-error {
    color: var(--low);
    font-size: 0.9em;
}

.info {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
    gap: 24px;
    margin-top: 24px;
}

.info-card {
    text-align: center;
    padding: 24px;
    border-radius: 10px;
    border: 1px solid var(--border);
}

.info-card h3 {
    margin-bottom: 8px;
}

.info-card p {
    font-size: 0.9em;
    color: var(--text-secondary);
}
"#;

const INFO_CARDS: [(&str, &str); 3] = [
    (
        "Comprehensive Database",
        "Access millions of parts across thousands of vehicle models and years",
    ),
    (
        "Confidence Ratings",
        "Each interchange match includes confidence levels to help you make informed decisions",
    ),
    (
        "Professional Tools",
        "Built for mechanics, parts suppliers, and automotive professionals",
    ),
];

/// The whole search page
pub fn index_html(page: &Page) -> String {
    let info: String = INFO_CARDS
        .iter()
        .map(|(title, body)| {
            format!(
                "<div class=\"info-card\"><h3>{}</h3><p>{}</p></div>",
                html_escape(title),
                html_escape(body)
            )
        })
        .collect();

    format!(
"<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"UTF-8\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
    <title>{title}</title>
    <link rel=\"stylesheet\" href=\"/static/style.css\">
    <script src=\"https://unpkg.com/htmx.org@1.9.10\"></script>
</head>
<body>
    <header class=\"hero\">
        <h1>{title}</h1>
        <p>{tagline}</p>
    </header>
    <main class=\"container\">
        <div class=\"forms\">
            {vehicle}
            {part}
        </div>
        {results}
        <div class=\"info\">{info}</div>
    </main>
</body>
</html>",
        title = APP_TITLE,
        tagline = APP_TAGLINE,
        vehicle = vehicle_selector_html(&page.vehicle),
        part = part_search_html(&page.part),
        results = results_html(&page.results_view()),
        info = info,
    )
}

/// Vehicle selector card
pub fn vehicle_selector_html(selector: &VehicleSelector) -> String {
    let fields: String = VehicleField::ALL
        .iter()
        .map(|&field| {
            select_html(
                field.label(),
                &format!("/htmx/vehicle/{}", field.as_str()),
                "#vehicle-selector",
                &format!("Select {}", field.as_str()),
                selector.value(field),
                &selector
                    .options(field)
                    .iter()
                    .map(|o| (o.as_str(), o.as_str()))
                    .collect::<Vec<_>>(),
                !selector.is_enabled(field),
            )
        })
        .collect();

    format!(
        "<section class=\"card\" id=\"vehicle-selector\">
            <h2>Select Vehicle</h2>
            <div class=\"fields\">{}</div>
        </section>",
        fields
    )
}

/// Part search card
pub fn part_search_html(search: &PartSearch) -> String {
    let categories = search.category_options();
    let category_select = select_html(
        "Category",
        "/htmx/part/category",
        "#part-search",
        "Select category",
        search.category(),
        &categories
            .iter()
            .map(|c| (c.as_str(), c.as_str()))
            .collect::<Vec<_>>(),
        false,
    );

    let part_options = search.part_options();
    let part_select = select_html(
        "Part Name",
        "/htmx/part/name",
        "#part-search",
        "Select part",
        search.part(),
        &part_options
            .iter()
            .map(|p| (p.as_str(), part_label(p)))
            .collect::<Vec<_>>(),
        search.category().is_empty(),
    );

    let custom_field = if search.is_custom() {
        text_input_html(
            "Custom Part Name",
            CUSTOM_NAME_FIELD,
            "/htmx/part/custom-name",
            "Enter part name",
            search.custom_name(),
        )
    } else {
        String::new()
    };

    format!(
        "<section class=\"card\" id=\"part-search\">
            <h2>Search Parts</h2>
            <div class=\"fields\">{}{}</div>
            {}
            {}
            {}
        </section>",
        category_select,
        part_select,
        custom_field,
        text_input_html(
            "Part Number (Optional)",
            PART_NUMBER_FIELD,
            "/htmx/part/number",
            "Enter part number",
            search.part_number(),
        ),
        search_button_html(search)
    )
}

/// The submit button, re-rendered as text fields change
pub fn search_button_html(search: &PartSearch) -> String {
    format!(
        "<button id=\"search-button\" class=\"search-button\" hx-post=\"/htmx/search\" hx-include=\"#part-search input[type=text]\" hx-target=\"#results\" hx-swap=\"outerHTML\"{}>{}</button>",
        if search.can_search() { "" } else { " disabled" },
        SEARCH_BUTTON_LABEL
    )
}

/// Results panel in one of its three states
pub fn results_html(view: &ResultsView) -> String {
    let Some(query) = view.query() else {
        return format!(
            "<section class=\"card results-empty\" id=\"results\"><p>{}</p></section>",
            PROMPT_MESSAGE
        );
    };

    let part_number = query
        .part
        .part_number
        .as_deref()
        .map(|pn| format!("<p><strong>Part Number:</strong> {}</p>", html_escape(pn)))
        .unwrap_or_default();

    let header = format!(
        "<h2>Interchange Results</h2>
        <div class=\"query-summary\">
            <p><strong>Vehicle:</strong> {}</p>
            <p><strong>Part:</strong> {}<span class=\"badge\">{}</span></p>
            {}
        </div>",
        html_escape(&query.vehicle.to_string()),
        html_escape(&query.part.name),
        html_escape(&query.part.category),
        part_number
    );

    let body = match view {
        ResultsView::Found { rows, .. } => {
            let rows_html: String = rows.iter().map(result_row_html).collect();
            format!(
                "<p class=\"result-count\">{}</p>{}",
                view.summary().unwrap_or_default(),
                rows_html
            )
        }
        _ => format!(
            "<div class=\"results-empty\"><p>{}</p><p class=\"notes\">{}</p></div>",
            NOT_FOUND_MESSAGE, NOT_FOUND_HINT
        ),
    };

    // Re-fetch once the copied indicator has cleared.
    let refresh = if view.rows().iter().any(|r| r.copied) {
        format!(
            " hx-get=\"/htmx/results\" hx-trigger=\"load delay:{}ms\" hx-swap=\"outerHTML\"",
            COPY_FEEDBACK_DELAY.as_millis()
        )
    } else {
        String::new()
    };

    format!(
        "<section class=\"card\" id=\"results\"{}>{}{}</section>",
        refresh, header, body
    )
}

fn result_row_html(row: &ResultRow) -> String {
    let record = &row.record;
    let level = record.confidence.as_str();
    let vals = serde_json::json!({ "part_number": record.part_number }).to_string();
    let notes = record
        .notes
        .as_deref()
        .map(|n| format!("<p class=\"notes\">{}</p>", html_escape(n)))
        .unwrap_or_default();

    format!(
        "<div class=\"result-row\">
            <h3>{identity}</h3><span class=\"badge confidence-{level}\">{level} confidence</span>
            <div class=\"part-number\">
                Part Number: <code>{pn}</code>
                <button class=\"copy-button{copied_class}\" data-part=\"{pn}\" hx-post=\"/htmx/copy\" hx-vals=\"{vals}\" hx-target=\"#results\" hx-swap=\"outerHTML\" onclick=\"navigator.clipboard &amp;&amp; navigator.clipboard.writeText(this.dataset.part)\">{label}</button>
            </div>
            {notes}
        </div>",
        identity = html_escape(&record.identity()),
        level = level,
        pn = html_escape(&record.part_number),
        copied_class = if row.copied { " copied" } else { "" },
        vals = html_escape(&vals),
        label = if row.copied { "Copied" } else { "Copy" },
        notes = notes,
    )
}

/// Inline notice for rejected form input
pub fn form_error_html(err: &FormError) -> String {
    format!("<p class=\"form-error\">{}</p>", html_escape(&err.to_string()))
}

/// Plain-text results view for the terminal
pub fn results_text(view: &ResultsView) -> String {
    let Some(query) = view.query() else {
        return PROMPT_MESSAGE.to_string();
    };

    let mut out = format!(
        "Vehicle: {}\nPart:    {} ({})\n",
        query.vehicle, query.part.name, query.part.category
    );
    if let Some(pn) = &query.part.part_number {
        out.push_str(&format!("Number:  {}\n", pn));
    }
    out.push('\n');

    match view.summary() {
        Some(summary) => {
            out.push_str(&summary);
            out.push('\n');
            for row in view.rows() {
                let record = &row.record;
                out.push_str(&format!(
                    "  {:<28} {:<7} {}\n",
                    record.identity(),
                    record.confidence.as_str(),
                    record.part_number
                ));
                if let Some(notes) = &record.notes {
                    out.push_str(&format!("  {:<28} {}\n", "", notes));
                }
            }
        }
        None => {
            out.push_str(NOT_FOUND_MESSAGE);
            out.push('\n');
            out.push_str(NOT_FOUND_HINT);
            out.push('\n');
        }
    }
    out
}

fn part_label(value: &str) -> &str {
    if value == CUSTOM_PART {
        CUSTOM_PART_LABEL
    } else {
        value
    }
}

fn select_html(
    label: &str,
    post_to: &str,
    target: &str,
    placeholder: &str,
    selected: &str,
    options: &[(&str, &str)],
    disabled: bool,
) -> String {
    // A kept value the options no longer list still shows as selected.
    let unlisted = if !selected.is_empty() && !options.iter().any(|(value, _)| *value == selected) {
        format!(
            "<option value=\"{0}\" selected>{0}</option>",
            html_escape(selected)
        )
    } else {
        String::new()
    };

    let options_html: String = options
        .iter()
        .map(|(value, text)| {
            format!(
                "<option value=\"{}\"{}>{}</option>",
                html_escape(value),
                if *value == selected { " selected" } else { "" },
                html_escape(text)
            )
        })
        .collect();

    format!(
        "<div class=\"field\">
            <label>{label}</label>
            <select name=\"value\" hx-post=\"{post_to}\" hx-trigger=\"change\" hx-target=\"{target}\" hx-swap=\"outerHTML\"{disabled}>
                <option value=\"\" disabled{placeholder_selected}>{placeholder}</option>
                {unlisted}{options}
            </select>
        </div>",
        label = html_escape(label),
        post_to = post_to,
        target = target,
        disabled = if disabled { " disabled" } else { "" },
        placeholder_selected = if selected.is_empty() { " selected" } else { "" },
        placeholder = html_escape(placeholder),
        unlisted = unlisted,
        options = options_html,
    )
}

fn text_input_html(label: &str, name: &str, post_to: &str, placeholder: &str, value: &str) -> String {
    format!(
        "<div class=\"field\">
            <label>{}</label>
            <input type=\"text\" name=\"{}\" placeholder=\"{}\" value=\"{}\" autocomplete=\"off\" hx-post=\"{}\" hx-trigger=\"input changed delay:300ms\" hx-target=\"#search-button\" hx-swap=\"outerHTML\">
        </div>",
        html_escape(label),
        name,
        html_escape(placeholder),
        html_escape(value),
        post_to
    )
}

/// Simple HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use interchange_core::{canonical_results, Catalog, PartQuery, SearchQuery, Vehicle};
    use std::sync::Arc;

    fn query(part_number: Option<&str>) -> SearchQuery {
        let mut part = PartQuery::new("Engine", "Starter Motor");
        part.part_number = part_number.map(str::to_string);
        SearchQuery::new(Vehicle::new("2001", "Dodge", "Ram 1500"), part)
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>\"R&D\"</b>"), "&lt;b&gt;&quot;R&amp;D&quot;&lt;/b&gt;");
    }

    #[test]
    fn prompt_state() {
        let html = results_html(&ResultsView::Prompt);
        assert!(html.contains(PROMPT_MESSAGE));
        assert!(!html.contains("Interchange Results"));
    }

    #[test]
    fn not_found_state() {
        let html = results_html(&ResultsView::build(Some(&query(None)), &[], None));
        assert!(html.contains(NOT_FOUND_MESSAGE));
        assert!(html.contains(NOT_FOUND_HINT));
        assert!(html.contains("2001 Dodge Ram 1500"));
        assert!(!html.contains("Part Number:"));
    }

    #[test]
    fn found_state() {
        let view = ResultsView::build(Some(&query(Some("STM-9"))), &canonical_results(), None);
        let html = results_html(&view);
        assert!(html.contains("Found 4 compatible vehicles"));
        assert!(html.contains("<strong>Part Number:</strong> STM-9"));
        assert!(html.contains("confidence-high"));
        assert!(html.contains("confidence-medium"));
        assert!(html.contains("Jeep Grand Cherokee"));
        assert!(html.contains("Compatible with 5.2L engine only"));
        assert!(!html.contains("hx-trigger=\"load"));
    }

    #[test]
    fn copied_rows_highlight_and_schedule_refresh() {
        let view = ResultsView::build(
            Some(&query(None)),
            &canonical_results(),
            Some("STM-1001-B"),
        );
        let html = results_html(&view);
        assert_eq!(html.matches("copy-button copied").count(), 1);
        assert!(html.contains("load delay:2000ms"));
    }

    #[test]
    fn copy_button_values_are_escaped_json() {
        let html = results_html(&ResultsView::build(Some(&query(None)), &canonical_results()[..1], None));
        assert!(html.contains("hx-vals=\"{&quot;part_number&quot;:&quot;STM-1001-A&quot;}\""));
    }

    #[test]
    fn vehicle_selector_disables_model_until_make() {
        let selector = VehicleSelector::new(Arc::new(Catalog::builtin(2024)));
        let html = vehicle_selector_html(&selector);
        assert!(html.contains("hx-post=\"/htmx/vehicle/model\""));
        assert!(html.contains("<option value=\"2024\">2024</option>"));
        let model_select = html.split("/htmx/vehicle/model").nth(1).unwrap();
        assert!(model_select.contains(" disabled>"));
    }

    #[test]
    fn part_search_shows_custom_field_only_for_sentinel() {
        let mut search = PartSearch::new(Arc::new(Catalog::builtin(2024)));
        search.select_category("Engine").unwrap();
        let html = part_search_html(&search);
        assert!(html.contains(CUSTOM_PART_LABEL));
        assert!(!html.contains("/htmx/part/custom-name"));
        assert!(html.contains(" disabled>Search Interchangeable Parts"));

        search.select_part(CUSTOM_PART).unwrap();
        search.set_custom_name("Starter Relay");
        let html = part_search_html(&search);
        assert!(html.contains("/htmx/part/custom-name"));
        assert!(html.contains("value=\"Starter Relay\""));
        assert!(html.contains("\">Search Interchangeable Parts"));
    }

    #[test]
    fn kept_part_stays_selected_after_category_change() {
        let mut search = PartSearch::new(Arc::new(Catalog::builtin(2024)));
        search.select_category("Brakes").unwrap();
        search.select_part("Brake Pads").unwrap();
        search.select_category("Engine").unwrap();

        let html = part_search_html(&search);
        let part_select = html
            .split("hx-post=\"/htmx/part/name\"")
            .nth(1)
            .and_then(|rest| rest.split("</select>").next())
            .unwrap();
        assert_eq!(part_select.matches(" selected").count(), 1);
        assert!(part_select.contains("<option value=\"Brake Pads\" selected>Brake Pads</option>"));
        assert!(part_select.contains("<option value=\"Starter Motor\">Starter Motor</option>"));
        assert!(html.contains("\">Search Interchangeable Parts"));
    }

    #[test]
    fn text_inputs_post_on_any_input_and_ride_along_with_search() {
        let mut search = PartSearch::new(Arc::new(Catalog::builtin(2024)));
        search.select_category("Engine").unwrap();
        search.select_part(CUSTOM_PART).unwrap();

        let html = part_search_html(&search);
        assert!(html.contains("name=\"custom_name\""));
        assert!(html.contains("name=\"part_number\""));
        assert_eq!(html.matches("hx-trigger=\"input changed delay:300ms\"").count(), 2);
        assert!(!html.contains("keyup"));
        assert!(search_button_html(&search).contains("hx-include=\"#part-search input[type=text]\""));
    }

    #[test]
    fn index_page_has_title_and_sections() {
        let page = Page::new(
            Arc::new(Catalog::builtin(2024)),
            Arc::new(interchange_form::StaticMatcher::default()),
        );
        let html = index_html(&page);
        assert!(html.contains("<h1>Parts Interchange Buddy</h1>"));
        assert!(html.contains("id=\"vehicle-selector\""));
        assert!(html.contains("id=\"part-search\""));
        assert!(html.contains("id=\"results\""));
        assert!(html.contains("Confidence Ratings"));
    }
}
