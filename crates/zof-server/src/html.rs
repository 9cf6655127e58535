//! HTML rendering for the web form.
//!
//! The page is a single form. After a POST it is re-rendered with the
//! submitted values filled in, followed by a notice, an error, or the result
//! summary and trace table.

use zof_math::problem::{Method, Solution};

use crate::handlers::SolveForm;

/// What to show below the form.
#[derive(Debug, Default)]
pub struct Page<'a> {
    /// Submitted values, echoed back into the inputs.
    pub form: Option<&'a SolveForm>,
    /// Informational message, e.g. an unrecognised method.
    pub notice: Option<&'a str>,
    /// Error message from validation or the solver.
    pub error: Option<&'a str>,
    /// A finished solve.
    pub solution: Option<&'a Solution>,
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Renders the full page.
pub fn render(page: &Page<'_>) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>ZOF Root Finder</title>\n</head>\n<body>\n<h1>ZOF Root Finder</h1>\n",
    );

    html.push_str(&render_form(page.form));

    if let Some(notice) = page.notice {
        html.push_str(&format!("<p class=\"notice\">{}</p>\n", escape(notice)));
    }
    if let Some(error) = page.error {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }
    if let Some(solution) = page.solution {
        html.push_str(&render_solution(solution));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_form(form: Option<&SolveForm>) -> String {
    let value = |pick: fn(&SolveForm) -> &str| form.map(pick).map(escape).unwrap_or_default();
    let selected = form.map(|f| f.method.as_str()).unwrap_or_default();

    let mut html = String::from("<form method=\"post\" action=\"/\">\n");
    html.push_str(&format!(
        "<label>f(x) <input name=\"equation\" value=\"{}\" placeholder=\"x**3 - x - 2\"></label>\n",
        value(|f| f.equation.as_str())
    ));

    html.push_str("<label>Method <select name=\"method\">\n");
    for method in Method::all() {
        let attr = if method.slug() == selected { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            method.slug(),
            attr,
            method.name()
        ));
    }
    html.push_str("</select></label>\n");

    let fields: [(&str, &str, fn(&SolveForm) -> &str); 8] = [
        ("tol", "Tolerance", |f| f.tol.as_str()),
        ("max_iter", "Max iterations", |f| f.max_iter.as_str()),
        ("a", "a", |f| f.a.as_str()),
        ("b", "b", |f| f.b.as_str()),
        ("x0", "x0", |f| f.x0.as_str()),
        ("x1", "x1", |f| f.x1.as_str()),
        ("g_expr", "g(x)", |f| f.g_expr.as_str()),
        ("delta", "delta", |f| f.delta.as_str()),
    ];
    for (name, label, pick) in fields {
        html.push_str(&format!(
            "<label>{} <input name=\"{}\" value=\"{}\"></label>\n",
            label,
            name,
            value(pick)
        ));
    }

    html.push_str("<button type=\"submit\">Solve</button>\n</form>\n");
    html
}

fn render_solution(solution: &Solution) -> String {
    let result = &solution.result;
    let mut html = format!("<h2>{}</h2>\n<ul class=\"summary\">\n", solution.method.name());
    html.push_str(&format!("<li>Root: {}</li>\n", result.root));
    html.push_str(&format!("<li>Estimated Error: {}</li>\n", cell(result.error)));
    html.push_str(&format!("<li>Iterations: {}</li>\n", result.iterations));
    html.push_str(&format!("<li>Status: {}</li>\n", result.termination));
    if let Some(derivative) = &solution.derivative {
        html.push_str(&format!("<li>f'(x) = {}</li>\n", escape(derivative)));
    }
    html.push_str("</ul>\n<table class=\"trace\">\n<tr>");

    for column in solution.method.trace_columns() {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr>\n");

    for record in &result.trace {
        html.push_str(&format!("<tr><td>{}</td>", record.iteration));
        for value in record.values() {
            html.push_str(&format!("<td>{}</td>", cell(value)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>\n");
    html
}
