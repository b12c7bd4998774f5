//! Canonical signature rendering.
//!
//! The rendered strings are part of the output format, absent pieces
//! included: a missing parameter list renders as `()`.

/// Which declaration shape to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureStyle {
    /// `def name(params) -> ret`
    Def,
    /// `async function* name(params): ret`
    Function,
    /// `const name = async (params) =>: ret`
    ConstArrow,
}

/// The pieces a signature is rendered from.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureParts<'a> {
    pub name: &'a str,
    pub parameters: Option<&'a str>,
    pub return_type: Option<&'a str>,
    pub is_async: bool,
    pub is_generator: bool,
}

impl SignatureParts<'_> {
    fn params(&self) -> &str {
        self.parameters.unwrap_or("()")
    }

    fn async_prefix(&self) -> &'static str {
        if self.is_async {
            "async "
        } else {
            ""
        }
    }

    fn return_suffix(&self) -> String {
        self.return_type
            .map(|ret| format!(": {ret}"))
            .unwrap_or_default()
    }
}

pub fn render(style: SignatureStyle, parts: &SignatureParts<'_>) -> String {
    match style {
        SignatureStyle::Def => {
            let mut signature = format!("def {}{}", parts.name, parts.params());
            if let Some(ret) = parts.return_type {
                signature.push_str(" -> ");
                signature.push_str(ret);
            }
            signature
        }
        SignatureStyle::Function => {
            let keyword = if parts.is_generator {
                "function* "
            } else {
                "function "
            };
            format!(
                "{}{}{}{}{}",
                parts.async_prefix(),
                keyword,
                parts.name,
                parts.params(),
                parts.return_suffix()
            )
        }
        // The return suffix is glued to the arrow with no space.
        SignatureStyle::ConstArrow => format!(
            "const {} = {}{} =>{}",
            parts.name,
            parts.async_prefix(),
            parts.params(),
            parts.return_suffix()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn def_with_return_type() {
        let parts = SignatureParts {
            name: "foo",
            parameters: Some("(x: int)"),
            return_type: Some("int"),
            ..Default::default()
        };
        assert_eq!(render(SignatureStyle::Def, &parts), "def foo(x: int) -> int");
    }

    #[test]
    fn def_without_parameters_or_return() {
        let parts = SignatureParts {
            name: "bare",
            ..Default::default()
        };
        assert_eq!(render(SignatureStyle::Def, &parts), "def bare()");
    }

    #[test]
    fn async_generator_function() {
        let parts = SignatureParts {
            name: "stream",
            parameters: Some("(n)"),
            is_async: true,
            is_generator: true,
            ..Default::default()
        };
        assert_eq!(
            render(SignatureStyle::Function, &parts),
            "async function* stream(n)"
        );
    }

    #[test]
    fn function_with_return_type() {
        let parts = SignatureParts {
            name: "add",
            parameters: Some("(a: number, b: number)"),
            return_type: Some("number"),
            ..Default::default()
        };
        assert_eq!(
            render(SignatureStyle::Function, &parts),
            "function add(a: number, b: number): number"
        );
    }

    #[test]
    fn const_arrow_glues_return_type() {
        let parts = SignatureParts {
            name: "add",
            parameters: Some("(a: number, b: number)"),
            return_type: Some("number"),
            ..Default::default()
        };
        assert_eq!(
            render(SignatureStyle::ConstArrow, &parts),
            "const add = (a: number, b: number) =>: number"
        );
    }

    #[test]
    fn const_arrow_async_without_return() {
        let parts = SignatureParts {
            name: "load",
            parameters: Some("(url)"),
            is_async: true,
            ..Default::default()
        };
        assert_eq!(
            render(SignatureStyle::ConstArrow, &parts),
            "const load = async (url) =>"
        );
    }
}
