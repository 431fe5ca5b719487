use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{
    braced, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token, Expr, Ident, Token,
};

/// Input format: `in <dom>; <node>`
struct DomxInput {
    dom: Expr,
    node: Node,
}
impl Parse for DomxInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        input.parse::<Token![in]>()?;
        let dom = input.parse::<Expr>()?;
        input.parse::<Token![;]>()?;
        let node = input.parse::<Node>()?;
        if !input.is_empty() {
            return Err(input.error("expected a single root element"));
        }
        Ok(DomxInput { dom, node })
    }
}

/// `tag(args...)(args...)...`
struct Node {
    tag: Ident,
    calls: Vec<Punctuated<Arg, Token![,]>>,
}
impl Parse for Node {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let tag = input.parse::<Ident>()?;
        let mut calls = Vec::new();
        while input.peek(token::Paren) {
            let args;
            parenthesized!(args in input);
            let args: Punctuated<Arg, Token![,]> = Punctuated::parse_terminated(&args)?;
            check_bare_attributes(&args, !calls.is_empty())?;
            calls.push(args);
        }
        Ok(Node { tag, calls })
    }
}

enum Arg {
    /// `name = value`; `name = None` has no value.
    Attribute { name: Ident, value: Option<Expr> },
    /// A lone `name`, which is an attribute without a value.
    Bare(Ident),
    /// A nested `tag(...)`.
    Node(Node),
    /// A literal or a `{ expression }`.
    Content(Expr),
}
impl Parse for Arg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(token::Brace) {
            let body;
            braced!(body in input);
            return Ok(Arg::Content(body.parse()?));
        }
        if input.peek(Ident) {
            if input.peek2(Token![=]) && !input.peek2(Token![==]) {
                let name = input.parse::<Ident>()?;
                input.parse::<Token![=]>()?;
                let value = input.parse::<Expr>()?;
                let value = match &value {
                    Expr::Path(path) if path.path.is_ident("None") => None,
                    _ => Some(value),
                };
                return Ok(Arg::Attribute { name, value });
            }
            if input.peek2(token::Paren) {
                return Ok(Arg::Node(input.parse()?));
            }
            if input.peek2(Token![,]) || is_last(input) {
                return Ok(Arg::Bare(input.parse()?));
            }
        }
        Ok(Arg::Content(input.parse()?))
    }
}

/// A lone identifier next to content, or in a call after the first, is more
/// likely a variable meant as content, so it must be spelled out either way.
fn check_bare_attributes(args: &Punctuated<Arg, Token![,]>, later_call: bool) -> syn::Result<()> {
    let has_content = args
        .iter()
        .any(|arg| matches!(arg, Arg::Node(_) | Arg::Content(_)));
    if !has_content && !later_call {
        return Ok(());
    }
    match args.iter().find_map(|arg| match arg {
        Arg::Bare(name) => Some(name),
        _ => None,
    }) {
        Some(name) => Err(syn::Error::new(
            name.span(),
            format!(
                "`{name}` is ambiguous in a call with content; \
                 write `{{ {name} }}` for content or `{name} = None` for a bare attribute"
            ),
        )),
        None => Ok(()),
    }
}

fn is_last(input: ParseStream) -> bool {
    let fork = input.fork();
    fork.parse::<Ident>().is_ok() && fork.is_empty()
}

/// Wrapper to allow code generation against the factory binding.
struct NodeWithDom<'a> {
    dom: &'a Ident,
    node: &'a Node,
}
impl ToTokens for NodeWithDom<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        node_to_tokens(self.dom, self.node, tokens);
    }
}

fn node_to_tokens(dom: &Ident, node: &Node, tokens: &mut TokenStream2) {
    let name = node.tag.to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name);
    let mut expr = quote! { #dom.tag(#name) };

    for args in &node.calls {
        let mut attributes = Vec::new();
        let mut contents = Vec::new();
        for arg in args {
            match arg {
                Arg::Attribute { name, value } => {
                    let name = name.to_string();
                    attributes.push(match value {
                        Some(value) => quote! { (#name, #value) },
                        None => quote! { #name },
                    });
                }
                Arg::Bare(name) => {
                    let name = name.to_string();
                    attributes.push(quote! { #name });
                }
                Arg::Node(node) => contents.push(NodeWithDom { dom, node }.into_token_stream()),
                Arg::Content(content) => contents.push(content.into_token_stream()),
            }
        }

        let invocation = quote! {
            ::domx::Invocation::new(#dom.bump()) #(.attribute(#attributes))*
        };
        expr = if contents.is_empty() {
            quote! { #expr.and_then(|__el| __el.invoke(#invocation)) }
        } else {
            let content = nest_content(contents);
            quote! {
                #expr.and_then(|__el| {
                    #invocation
                        .with_content(#content)
                        .and_then(|__inv| __el.invoke(__inv))
                })
            }
        };
    }

    tokens.extend(expr);
}

/// Fold positional items into right-nested pairs, `(a, (b, c))`, so any number
/// of heterogeneous items forms a single content value.
fn nest_content(mut contents: Vec<TokenStream2>) -> TokenStream2 {
    let mut nested = match contents.pop() {
        Some(last) if contents.is_empty() => return quote! { (#last,) },
        Some(last) => last,
        None => return quote! { () },
    };
    while let Some(item) = contents.pop() {
        nested = quote! { (#item, #nested) };
    }
    nested
}

#[proc_macro]
/// Constructs a [`domx::Element`] by calling tags like functions.
///
/// # Syntax
///
/// ```ignore
/// domx! { in <dom>; <tag>(<args>)(<args>)... }
/// ```
///
/// `<dom>` is an expression evaluating to a `domx::Dom`. Each parenthesized
/// group is one call on the element. Within a call:
///
/// - `name = value` is a named attribute (`name = None` is a bare attribute);
/// - a lone `name` is a bare attribute in a first call without content;
///   elsewhere it is rejected in favour of `{ name }` or `name = None`;
/// - `tag(...)` is a nested element;
/// - a literal, or any expression wrapped in `{}`, is content.
///
/// Attribute names that are Rust keywords can be written as `type_` or `r#type`.
///
/// The macro evaluates to a `Result<domx::Element, domx::DomError>`.
///
/// # Example
///
/// ```ignore
/// use domx::{bumpalo::Bump, domx, Dom};
///
/// let bump = Bump::new();
/// let dom = Dom::new(&bump);
/// let element = domx! { in dom;
///     ul(class = "names")({ dom.seq(names.iter().map(|n| domx! { in dom; li()({ n }) })) })
/// }?;
/// ```
pub fn domx(input: TokenStream) -> TokenStream {
    let DomxInput { dom, node } = syn::parse_macro_input!(input as DomxInput);

    let binding = Ident::new("__dom", proc_macro2::Span::call_site());
    let node = NodeWithDom {
        dom: &binding,
        node: &node,
    };

    quote! {{
        let #binding: ::domx::Dom<'_> = #dom;
        #node
    }}
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_attributes_parse_without_content() {
        let node: Node = syn::parse_str("button(disabled, id = \"b\")(\"Click\")").unwrap();
        assert_eq!(node.calls.len(), 2);
        assert!(matches!(node.calls[0].first(), Some(Arg::Bare(name)) if *name == "disabled"));
    }

    #[test]
    fn lone_identifier_next_to_content_is_rejected() {
        let err = syn::parse_str::<Node>("li()(name, \"x\")").err().unwrap();
        assert!(err.to_string().contains("`{ name }`"), "{err}");
        let err = syn::parse_str::<Node>("li()(span()(), name)").err().unwrap();
        assert!(err.to_string().contains("`name = None`"), "{err}");
    }

    #[test]
    fn lone_identifier_in_a_later_call_is_rejected() {
        let err = syn::parse_str::<Node>("li()(name)").err().unwrap();
        assert!(err.to_string().contains("`{ name }`"), "{err}");
        let node: Node = syn::parse_str("li()(name = None)").unwrap();
        assert!(matches!(node.calls[1].first(), Some(Arg::Attribute { value: None, .. })));
        let node: Node = syn::parse_str("li()({ name })").unwrap();
        assert!(matches!(node.calls[1].first(), Some(Arg::Content(_))));
    }
}
