use serde::Serialize;
use std::collections::BTreeMap;

/// Variables handed to the template engine.
pub type TemplateVars = BTreeMap<String, String>;

/// Application area a template is rendered in.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Frontend,
    Adminhtml,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct TemplateOptions {
    pub area: Area,
    pub store: u32,
}

impl TemplateOptions {
    pub fn frontend(store: u32) -> Self {
        Self {
            area: Area::Frontend,
            store,
        }
    }

    pub fn adminhtml() -> Self {
        Self {
            area: Area::Adminhtml,
            store: 0,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EmailBody {
    Template {
        identifier: String,
        options: TemplateOptions,
        vars: TemplateVars,
    },
    Text {
        subject: String,
        body: String,
    },
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct EmailMessage {
    pub from: Mailbox,
    pub to: String,
    pub body: EmailBody,
}
