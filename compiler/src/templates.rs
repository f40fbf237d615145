//! Template selection: the built-in handlebars templates, their parameter
//! overrides, and the per-run dispatch table.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use handlebars::{handlebars_helper, no_escape, Handlebars};
use tracing::debug;

use crate::{
    error::{GenError, Result},
    params::{Parameters, STRICT_KEY, TEMPLATES_KEY},
    traits::{RenderFn, TemplateResolver},
    types::{Category, Node, OutputBuffer},
    utils::{go_package_name, quote, to_camel_case, to_go_ident, to_pascal_case, to_snake_case},
    visitor::classify,
};

const FILE_TEMPLATE: &str = include_str!("../templates/file.tmpl");
const SERVICE_TEMPLATE: &str = include_str!("../templates/service.tmpl");
const METHOD_UNARY_TEMPLATE: &str = include_str!("../templates/method_unary.tmpl");
const METHOD_SERVER_STREAMING_TEMPLATE: &str = include_str!("../templates/method_server_streaming.tmpl");
const METHOD_CLIENT_STREAMING_TEMPLATE: &str = include_str!("../templates/method_client_streaming.tmpl");
const MESSAGE_TEMPLATE: &str = include_str!("../templates/message.tmpl");

handlebars_helper!(pascal: |s: str| to_pascal_case(s));
handlebars_helper!(camel: |s: str| to_camel_case(s));
handlebars_helper!(snake: |s: str| to_snake_case(s));
handlebars_helper!(goident: |s: str| to_go_ident(s));
handlebars_helper!(gopkg: |s: str| go_package_name(s));

/// The template compiled into the binary for `category`.
pub fn builtin_template(category: Category) -> &'static str {
    match category {
        Category::File                  => FILE_TEMPLATE,
        Category::Service               => SERVICE_TEMPLATE,
        Category::MethodUnary           => METHOD_UNARY_TEMPLATE,
        Category::MethodServerStreaming => METHOD_SERVER_STREAMING_TEMPLATE,
        Category::MethodClientStreaming => METHOD_CLIENT_STREAMING_TEMPLATE,
        Category::Message               => MESSAGE_TEMPLATE,
    }
}

/// Finds the template text for `category`.
///
/// `<category>_template=<path>` wins over `templates=<dir>`, which wins over
/// the built-in template. A configured source that cannot be read is an
/// error, never a fallback to the built-in.
pub fn template_source(category: Category, params: &Parameters) -> Result<Cow<'static, str>> {
    if let Some(path) = params.get(&category.override_key()) {
        return read_template(category, Path::new(path));
    }
    if let Some(dir) = params.get(TEMPLATES_KEY) {
        return read_template(category, &Path::new(dir).join(category.template_file_name()));
    }
    Ok(Cow::Borrowed(builtin_template(category)))
}

fn read_template(category: Category, path: &Path) -> Result<Cow<'static, str>> {
    debug!(%category, path = %path.display(), "loading template override");
    fs::read_to_string(path).map(Cow::Owned).map_err(|e| {
        GenError::Configuration(format!(
            "Cannot read {} template {}: {}",
            category,
            quote(&path.display().to_string()),
            e
        ))
    })
}

/// Resolves categories to handlebars templates that emit Go source.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlebarsResolver;

impl HandlebarsResolver {
    fn registry(strict: bool) -> Handlebars<'static> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(strict);
        hb.register_escape_fn(no_escape);
        hb.register_helper("pascal", Box::new(pascal));
        hb.register_helper("camel", Box::new(camel));
        hb.register_helper("snake", Box::new(snake));
        hb.register_helper("goident", Box::new(goident));
        hb.register_helper("gopkg", Box::new(gopkg));
        hb
    }
}

impl TemplateResolver for HandlebarsResolver {
    fn resolve(&self, category: Category, params: &Parameters) -> Result<RenderFn> {
        let source = template_source(category, params)?;
        let strict = params.bool_or(STRICT_KEY, true)?;

        let mut hb = HandlebarsResolver::registry(strict);
        hb.register_template_string(category.as_str(), source.as_ref())
            .map_err(|e| GenError::TemplateCompilation {
                category,
                message: e.to_string(),
            })?;

        Ok(RenderFn::new(move |node: Node<'_>, out: &mut OutputBuffer| {
            let rendered = hb.render(category.as_str(), &node).map_err(|e| GenError::Render {
                category,
                node:    node.describe(),
                message: e.to_string(),
            })?;
            out.append(&rendered);
            Ok(())
        }))
    }
}

/// Render functions for all six categories, resolved once per run.
///
/// Building the table up front surfaces configuration and compilation
/// errors before the first file is touched.
#[derive(Debug)]
pub struct DispatchTable {
    renderers: Vec<RenderFn>,
}

impl DispatchTable {
    pub fn build<R: TemplateResolver + ?Sized>(resolver: &R, params: &Parameters) -> Result<Self> {
        let renderers = Category::ALL
            .into_iter()
            .map(|category| resolver.resolve(category, params))
            .collect::<Result<Vec<_>>>()?;
        Ok(DispatchTable { renderers })
    }

    pub fn get(&self, category: Category) -> &RenderFn {
        &self.renderers[category.index()]
    }

    /// Classifies `node`, renders it with its category's function and
    /// returns the category used.
    pub fn render(&self, node: Node<'_>, out: &mut OutputBuffer) -> Result<Category> {
        let category = classify(&node);
        debug!(node = %node.describe(), %category, "rendering");
        self.get(category).render(node, out)?;
        Ok(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amzn_schema::{File, Method, Service};
    use std::fmt::Write;

    fn greet() -> File {
        File::new("greet.proto", "greet.v1").with_service(
            Service::new("Greeter").with_method(Method::new("SayHello", "HelloRequest", "HelloReply")),
        )
    }

    #[test]
    fn every_builtin_template_compiles() {
        let params = Parameters::new();
        for category in Category::ALL {
            assert!(HandlebarsResolver.resolve(category, &params).is_ok(), "{category}");
        }
    }

    #[test]
    fn builtin_file_template_renders_header() {
        let file = greet();
        let render = HandlebarsResolver.resolve(Category::File, &Parameters::new()).unwrap();
        let mut out = OutputBuffer::new();
        render.render(Node::File(&file), &mut out).unwrap();
        let text = out.into_string();
        assert!(text.contains("DO NOT EDIT"));
        assert!(text.contains("source: greet.proto"));
        assert!(text.contains("package greet_v1"));
    }

    #[test]
    fn builtin_file_template_prefers_go_package() {
        let file = greet().with_go_package("example.com/greet;greetpb");
        let render = HandlebarsResolver.resolve(Category::File, &Parameters::new()).unwrap();
        let mut out = OutputBuffer::new();
        render.render(Node::File(&file), &mut out).unwrap();
        let text = out.into_string();
        assert!(text.contains("package greetpb\n"));
        assert!(!text.contains("greet_v1"));
    }

    #[test]
    fn render_appends_after_existing_text() {
        let file = greet();
        let render = HandlebarsResolver.resolve(Category::Service, &Parameters::new()).unwrap();
        let mut out = OutputBuffer::new();
        write!(out, "PREFIX").unwrap();
        render
            .render(Node::Service { file: &file, service: &file.services[0] }, &mut out)
            .unwrap();
        let text = out.into_string();
        assert!(text.starts_with("PREFIX"));
        assert!(text.contains("type GreeterHandler struct"));
    }

    #[test]
    fn missing_override_file_is_configuration_error() {
        let params = Parameters::parse("message_template=/nonexistent/message.tmpl").unwrap();
        let err = HandlebarsResolver.resolve(Category::Message, &params).unwrap_err();
        assert!(matches!(err, GenError::Configuration(_)));
        // Other categories are unaffected.
        assert!(HandlebarsResolver.resolve(Category::File, &params).is_ok());
    }

    #[test]
    fn table_build_fails_on_first_bad_category() {
        let resolver = |category: Category, _: &Parameters| -> Result<RenderFn> {
            if category == Category::MethodClientStreaming {
                return Err(GenError::TemplateCompilation { category, message: "bad".into() });
            }
            Ok(RenderFn::new(|_: Node<'_>, _: &mut OutputBuffer| Ok(())))
        };
        let err = DispatchTable::build(&resolver, &Parameters::new()).unwrap_err();
        assert!(matches!(
            err,
            GenError::TemplateCompilation { category: Category::MethodClientStreaming, .. }
        ));
    }
}
