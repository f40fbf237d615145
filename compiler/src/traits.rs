use std::fmt;

use crate::{
    error::Result,
    params::Parameters,
    types::{Category, Node, OutputBuffer},
};

/// A render function bound to one category: appends the generated form of
/// a node to the sink.
pub struct RenderFn {
    inner: Box<dyn Fn(Node<'_>, &mut OutputBuffer) -> Result<()>>,
}

impl RenderFn {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(Node<'_>, &mut OutputBuffer) -> Result<()> + 'static,
    {
        RenderFn { inner: Box::new(render) }
    }

    pub fn render(&self, node: Node<'_>, out: &mut OutputBuffer) -> Result<()> {
        (self.inner)(node, out)
    }
}

impl fmt::Debug for RenderFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderFn")
    }
}

/// Produces the render function for a category.
///
/// Implementations must be pure in `(category, params)`. Failing to find a
/// template source is a `Configuration` error, failing to compile one is a
/// `TemplateCompilation` error.
pub trait TemplateResolver {
    fn resolve(&self, category: Category, params: &Parameters) -> Result<RenderFn>;
}

impl<F> TemplateResolver for F
where
    F: Fn(Category, &Parameters) -> Result<RenderFn>,
{
    fn resolve(&self, category: Category, params: &Parameters) -> Result<RenderFn> {
        self(category, params)
    }
}
