//! HTML and PlantUML page rendering.
//!
//! All templates are embedded and registered once at startup, so a typo
//! in a template fails the boot instead of the first request hitting it.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

pub struct Pages {
    registry: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_helper("json", Box::new(json_helper));

        registry.register_partial("layout_head", include_str!("../templates/layout_head.hbs"))?;
        registry.register_template_string("main", include_str!("../templates/main.hbs"))?;
        registry
            .register_template_string("model_list", include_str!("../templates/model_list.hbs"))?;
        registry
            .register_template_string("data_list", include_str!("../templates/data_list.hbs"))?;
        registry.register_template_string(
            "all_data_list",
            include_str!("../templates/all_data_list.hbs"),
        )?;
        registry
            .register_template_string("field_list", include_str!("../templates/field_list.hbs"))?;
        registry.register_template_string("detail", include_str!("../templates/detail.hbs"))?;
        registry.register_template_string("plantuml", include_str!("../templates/plantuml.hbs"))?;

        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, RenderError> {
        self.registry.render(template, data)
    }
}

/// `{{json value}}` — render any value as its compact JSON text.
fn json_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    let text = match h.param(0).map(|p| p.value()) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    out.write(&text)?;
    Ok(())
}
