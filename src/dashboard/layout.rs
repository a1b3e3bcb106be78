//! Page layout
//!
//! The static component tree of the dashboard. It is built once at startup,
//! served as JSON to the client script and rendered to HTML for the page shell.

use serde::Serialize;
use std::fmt::Write as _;

use super::selector::Variable;

pub const PAGE_TITLE: &str = "Impact of Hospital Stay Duration";

pub const TIME_IN_HOSPITAL_PLOT: &str = "time_in_hospital_plot";
pub const VARIABLE_DROPDOWN: &str = "variable-dropdown";
pub const SELECTED_VARIABLE_TITLE: &str = "selected-variable-title";
pub const SELECTED_VARIABLE_PLOT: &str = "selected_variable_plot";
pub const READMISSION_PLOT: &str = "readmission_plot";

/// One dropdown entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

/// A node of the page tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    Div {
        children: Vec<Component>,
    },
    Heading {
        level: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        centered: bool,
    },
    Label {
        text: String,
    },
    Dropdown {
        id: String,
        options: Vec<DropdownOption>,
        value: String,
    },
    Graph {
        id: String,
    },
}

impl Component {
    fn heading(level: u8, text: &str) -> Self {
        Component::Heading {
            level,
            id: None,
            text: Some(text.to_string()),
            centered: true,
        }
    }

    fn graph(id: &str) -> Self {
        Component::Graph { id: id.to_string() }
    }

    /// Element id, if the component has one
    pub fn id(&self) -> Option<&str> {
        match self {
            Component::Heading { id, .. } => id.as_deref(),
            Component::Dropdown { id, .. } | Component::Graph { id } => Some(id.as_str()),
            Component::Div { .. } | Component::Label { .. } => None,
        }
    }

    /// Depth-first search for a component by id
    pub fn find(&self, target: &str) -> Option<&Component> {
        if self.id() == Some(target) {
            return Some(self);
        }
        match self {
            Component::Div { children } => children.iter().find_map(|c| c.find(target)),
            _ => None,
        }
    }

    /// Render the tree to HTML markup
    pub fn render_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Component::Div { children } => {
                out.push_str("<div>\n");
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</div>\n");
            }
            Component::Heading {
                level,
                id,
                text,
                centered,
            } => {
                let _ = write!(out, "<h{}", level);
                if let Some(id) = id {
                    let _ = write!(out, " id=\"{}\"", escape(id));
                }
                if *centered {
                    out.push_str(" style=\"text-align:center\"");
                }
                let _ = writeln!(
                    out,
                    ">{}</h{}>",
                    escape(text.as_deref().unwrap_or_default()),
                    level
                );
            }
            Component::Label { text } => {
                let _ = writeln!(out, "<label for=\"{}\">{}</label>", VARIABLE_DROPDOWN, escape(text));
            }
            Component::Dropdown { id, options, value } => {
                let _ = writeln!(out, "<select id=\"{}\">", escape(id));
                for option in options {
                    let selected = if &option.value == value { " selected" } else { "" };
                    let _ = writeln!(
                        out,
                        "  <option value=\"{}\"{}>{}</option>",
                        escape(&option.value),
                        selected,
                        escape(&option.label)
                    );
                }
                out.push_str("</select>\n");
            }
            Component::Graph { id } => {
                let _ = writeln!(out, "<div class=\"graph\" id=\"{}\"></div>", escape(id));
            }
        }
    }
}

/// Build the dashboard's component tree
pub fn build_layout() -> Component {
    let options = Variable::ALL
        .into_iter()
        .map(|v| DropdownOption {
            label: v.label().to_string(),
            value: v.column().to_string(),
        })
        .collect();

    Component::Div {
        children: vec![
            Component::heading(1, PAGE_TITLE),
            Component::heading(2, "Distribution of Time in Hospital"),
            Component::graph(TIME_IN_HOSPITAL_PLOT),
            Component::Label {
                text: "Select Variable:".to_string(),
            },
            Component::Dropdown {
                id: VARIABLE_DROPDOWN.to_string(),
                options,
                value: Variable::default().column().to_string(),
            },
            Component::Heading {
                level: 2,
                id: Some(SELECTED_VARIABLE_TITLE.to_string()),
                text: None,
                centered: true,
            },
            Component::graph(SELECTED_VARIABLE_PLOT),
            Component::heading(2, "Time in Hospital vs Readmission Status"),
            Component::graph(READMISSION_PLOT),
        ],
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_has_all_placeholders() {
        let layout = build_layout();
        for id in [
            TIME_IN_HOSPITAL_PLOT,
            VARIABLE_DROPDOWN,
            SELECTED_VARIABLE_TITLE,
            SELECTED_VARIABLE_PLOT,
            READMISSION_PLOT,
        ] {
            assert!(layout.find(id).is_some(), "missing component {}", id);
        }
        assert!(layout.find("nope").is_none());
    }

    #[test]
    fn test_dropdown_options() {
        let layout = build_layout();
        let Some(Component::Dropdown { options, value, .. }) = layout.find(VARIABLE_DROPDOWN)
        else {
            panic!("dropdown not found");
        };

        assert_eq!(options.len(), 8);
        assert_eq!(value, "num_lab_procedures");
        assert_eq!(options[0].label, "Number of Lab Procedures");
        assert_eq!(options[5].value, "age");
        assert_eq!(options[3].label, "Number of Discharge Disposition ID");
    }

    #[test]
    fn test_layout_is_stable() {
        assert_eq!(build_layout(), build_layout());
    }

    #[test]
    fn test_render_html() {
        let html = build_layout().render_html();

        assert!(html.contains("<h1 style=\"text-align:center\">Impact of Hospital Stay Duration</h1>"));
        assert!(html.contains("<h2 id=\"selected-variable-title\" style=\"text-align:center\"></h2>"));
        assert!(html.contains("<option value=\"num_lab_procedures\" selected>"));
        assert!(html.contains("<div class=\"graph\" id=\"readmission_plot\"></div>"));
    }

    #[test]
    fn test_layout_json() {
        let json = serde_json::to_value(build_layout()).unwrap();
        assert_eq!(json["type"], "div");
        assert_eq!(json["children"][0]["type"], "heading");
        assert_eq!(json["children"][4]["type"], "dropdown");
        assert_eq!(json["children"][4]["value"], "num_lab_procedures");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a & \"b\">"), "&lt;a &amp; &quot;b&quot;&gt;");
    }
}
