//! Server-side HTML rendering for the entrybook page.
//!
//! The page is rebuilt from scratch on every request from a [`PageView`],
//! which holds the freshly queried records plus whatever selection and
//! banner the current request produced. All user-supplied text goes through
//! [`escape`].

use entrybook_entries::{Entry, MAX_AGE};

const PAGE_TITLE: &str = "Welcome to My App";

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin:.5rem 0}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.25rem .5rem;text-align:left}\
.banner{padding:.5rem 1rem;margin:1rem 0;border-radius:4px}\
.success{background:#e6f4ea}.error{background:#fce8e6}.info{background:#e8f0fe;padding:.5rem 1rem}";

/// Message shown at the top of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

/// Update-form input as the user submitted it.
///
/// Shown instead of the stored values when the submission was rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub id: i64,
    pub name: String,
    pub age: String,
    pub email: String,
}

/// Everything needed to render one page.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    /// All records, newest first.
    pub entries: Vec<Entry>,
    /// Record loaded into the update form.
    pub editing: Option<Entry>,
    /// Rejected input for the record in `editing`.
    pub draft: Option<EditDraft>,
    /// Record preselected in the delete picker.
    pub delete_selected: Option<i64>,
    pub banner: Option<Banner>,
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(raw: &str) -> String {
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

/// Renders the full page.
pub fn page(view: &PageView) -> String {
    let mut html = String::new();
    head(&mut html, PAGE_TITLE);
    html.push_str(&format!("<h1>{}</h1>", PAGE_TITLE));

    if let Some(banner) = &view.banner {
        render_banner(&mut html, banner);
    }

    add_section(&mut html);
    html.push_str("<hr>");
    records_section(&mut html, &view.entries);

    if !view.entries.is_empty() {
        html.push_str("<hr>");
        update_section(
            &mut html,
            &view.entries,
            view.editing.as_ref(),
            view.draft.as_ref(),
        );
        html.push_str("<hr>");
        delete_section(&mut html, &view.entries, view.delete_selected);
    }

    html.push_str("</main></body></html>");
    html
}

/// Renders the page shown when a request fails on the storage side.
pub fn error_page(message: &str) -> String {
    let mut html = String::new();
    head(&mut html, PAGE_TITLE);
    html.push_str(&format!(
        "<h1>Something went wrong</h1><div class=\"banner error\" role=\"alert\">{}</div>\
         <p><a href=\"/\">Back to the records</a></p></main></body></html>",
        escape(message)
    ));
    html
}

fn head(html: &mut String, title: &str) {
    html.push_str(&format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{}</style></head><body><main>",
        escape(title),
        STYLE
    ));
}

fn render_banner(html: &mut String, banner: &Banner) {
    let (class, role, text) = match banner {
        Banner::Success(text) => ("success", "status", text),
        Banner::Error(text) => ("error", "alert", text),
    };
    html.push_str(&format!(
        "<div class=\"banner {class}\" role=\"{role}\">{}</div>",
        escape(text)
    ));
}

fn add_section(html: &mut String) {
    html.push_str("<section id=\"add\"><h2>Add New Entry</h2>");
    html.push_str("<form method=\"post\" action=\"/entries\">");
    entry_inputs(html, "", "0", "");
    html.push_str("<button type=\"submit\">Add</button></form></section>");
}

fn records_section(html: &mut String, entries: &[Entry]) {
    html.push_str("<section id=\"records\"><h2>All Records</h2>");
    if entries.is_empty() {
        html.push_str("<p class=\"info\">No records found. Add one above.</p></section>");
        return;
    }

    html.push_str(
        "<table><thead><tr><th>id</th><th>name</th><th>age</th><th>email</th>\
         <th>created_at</th></tr></thead><tbody>",
    );
    for entry in entries {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.id,
            escape(&entry.name),
            entry.age.map(|a| a.to_string()).unwrap_or_default(),
            escape(entry.email.as_deref().unwrap_or_default()),
            escape(entry.created_at.as_deref().unwrap_or_default()),
        ));
    }
    html.push_str("</tbody></table></section>");
}

fn update_section(
    html: &mut String,
    entries: &[Entry],
    editing: Option<&Entry>,
    draft: Option<&EditDraft>,
) {
    html.push_str("<section id=\"update\"><h2>Update Record</h2>");
    html.push_str("<form method=\"get\" action=\"/\"><label>Pick a record to edit ");
    record_picker(html, "edit", entries, editing.map(|e| e.id));
    html.push_str("</label><button type=\"submit\">Edit</button></form>");

    if let Some(entry) = editing {
        html.push_str(&format!(
            "<form method=\"post\" action=\"/entries/update\">\
             <input type=\"hidden\" name=\"id\" value=\"{}\">",
            entry.id
        ));
        match draft.filter(|d| d.id == entry.id) {
            Some(draft) => entry_inputs(html, &draft.name, &draft.age, &draft.email),
            None => {
                // The stepper only accepts 0..=150; out-of-range stored ages are clamped.
                let age = entry.age.map(|a| a.clamp(0, MAX_AGE)).unwrap_or(0);
                entry_inputs(
                    html,
                    &entry.name,
                    &age.to_string(),
                    entry.email.as_deref().unwrap_or_default(),
                );
            }
        }
        html.push_str("<button type=\"submit\">Save changes</button></form>");
    }
    html.push_str("</section>");
}

fn delete_section(html: &mut String, entries: &[Entry], selected: Option<i64>) {
    html.push_str("<section id=\"delete\"><h2>Delete Record</h2>");
    html.push_str("<form method=\"post\" action=\"/entries/delete\"><label>Pick a record to delete ");
    record_picker(html, "id", entries, selected);
    html.push_str(
        "</label><label><input type=\"checkbox\" name=\"confirm\"> \
         I confirm deletion of the selected record</label>\
         <button type=\"submit\">Delete</button></form></section>",
    );
}

fn record_picker(html: &mut String, name: &str, entries: &[Entry], selected: Option<i64>) {
    html.push_str(&format!("<select name=\"{name}\">"));
    for entry in entries {
        let marker = if Some(entry.id) == selected {
            " selected"
        } else {
            ""
        };
        html.push_str(&format!(
            "<option value=\"{id}\"{marker}>{id}: {}</option>",
            escape(&entry.name),
            id = entry.id,
        ));
    }
    html.push_str("</select>");
}

fn entry_inputs(html: &mut String, name: &str, age: &str, email: &str) {
    html.push_str(&format!(
        "<label>Name <input type=\"text\" name=\"name\" value=\"{}\"></label>\
         <label>Age <input type=\"number\" name=\"age\" min=\"0\" max=\"{MAX_AGE}\" step=\"1\" \
         value=\"{}\"></label>\
         <label>Email <input type=\"text\" name=\"email\" value=\"{}\"></label>",
        escape(name),
        escape(age),
        escape(email),
    ));
}
