//! Page assets
//!
//! The HTML shell and the client script. The script fetches nothing but the
//! event endpoint: it posts the dropdown value on load and on every change,
//! then draws each returned chart spec with Plotly.

use crate::dashboard::layout::PAGE_TITLE;
use crate::dashboard::Component;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width,initial-scale=1">
<title>{{TITLE}}</title>
<script src="https://cdn.plot.ly/plotly-2.35.2.min.js"></script>
<style>
body{font-family:"Open Sans",verdana,arial,sans-serif;margin:0 auto;max-width:1100px;padding:16px;color:#2a3f5f}
select{display:block;width:100%;padding:6px;margin:4px 0 12px;font-size:14px}
.graph{min-height:450px}
#error{display:none;white-space:pre-wrap;background:#fdecea;color:#611a15;padding:8px 12px;border-radius:4px;margin-bottom:12px}
</style>
</head>
<body>
<div id="error"></div>
{{LAYOUT}}
<script src="/assets/dashboard.js"></script>
</body>
</html>
"##;

/// Client script served at `/assets/dashboard.js`
pub const DASHBOARD_JS: &str = r##"(function () {
  "use strict";

  var DROPDOWN = "variable-dropdown";

  function binCenters(binning) {
    var xs = [];
    for (var i = 0; i < binning.count; i++) {
      xs.push(binning.start + binning.width * (i + 0.5));
    }
    return xs;
  }

  function toPlotly(spec) {
    var uniform = spec.binning.kind === "uniform";
    var grouped = spec.layout.barmode === "group";
    var xs = uniform ? binCenters(spec.binning) : spec.binning.categories;

    var traces = spec.traces.map(function (t) {
      var marker = {};
      if (t.color) { marker.color = t.color; }
      if (spec.marker_line) {
        marker.line = { width: spec.marker_line.width, color: spec.marker_line.color };
      }
      var trace = { type: "bar", x: xs, y: t.counts, marker: marker };
      // Grouped bars are laid out by Plotly so bargap applies
      if (uniform && !grouped) { trace.width = spec.binning.width; }
      if (t.name) { trace.name = t.name; }
      return trace;
    });

    var layout = {
      title: { text: spec.layout.title },
      xaxis: { title: { text: spec.layout.xaxis_title } },
      yaxis: { title: { text: spec.layout.yaxis_title } },
      barmode: spec.layout.barmode,
      bargap: spec.layout.bargap === undefined ? 0 : spec.layout.bargap,
      showlegend: spec.traces.length > 1,
    };
    if (spec.layout.title_x !== undefined) { layout.title.x = spec.layout.title_x; }

    return { data: traces, layout: layout };
  }

  function showError(message) {
    var box = document.getElementById("error");
    box.textContent = message;
    box.style.display = message ? "block" : "none";
  }

  function apply(output) {
    var el = document.getElementById(output.id);
    if (!el) { return; }
    if (output.property === "figure") {
      var fig = toPlotly(output.value);
      Plotly.react(el, fig.data, fig.layout);
    } else {
      el.textContent = output.value;
    }
  }

  function fire(value) {
    fetch("/api/v1/events", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ id: DROPDOWN, property: "value", value: value }),
    })
      .then(function (resp) {
        return resp.json().then(function (body) { return { ok: resp.ok, body: body }; });
      })
      .then(function (res) {
        if (!res.ok) {
          var err = res.body.error || {};
          showError((err.code || "ERROR") + ": " + (err.detail || [err.message]).join("\n"));
          return;
        }
        showError("");
        res.body.outputs.forEach(apply);
      })
      .catch(function (e) { showError(String(e)); });
  }

  document.addEventListener("DOMContentLoaded", function () {
    var dropdown = document.getElementById(DROPDOWN);
    dropdown.addEventListener("change", function () { fire(dropdown.value); });
    fire(dropdown.value);
  });
})();
"##;

/// Render the full page around the layout tree
pub fn render_page(layout: &Component) -> String {
    PAGE_TEMPLATE
        .replace("{{TITLE}}", PAGE_TITLE)
        .replace("{{LAYOUT}}", &layout.render_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_layout;

    #[test]
    fn test_render_page() {
        let page = render_page(&build_layout());

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Impact of Hospital Stay Duration</title>"));
        assert!(page.contains("id=\"variable-dropdown\""));
        assert!(page.contains("/assets/dashboard.js"));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn test_grouped_bars_keep_plotly_widths() {
        assert!(DASHBOARD_JS.contains(r#"var grouped = spec.layout.barmode === "group";"#));
        assert!(DASHBOARD_JS.contains("if (uniform && !grouped) { trace.width"));
    }
}
