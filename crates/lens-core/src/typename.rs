//! Type name canonicalization and template-name parsing.
//!
//! Dispatch matches visualizers against *canonical* type names: the name
//! after following one level of reference and stripping typedef aliases and
//! cv-qualifiers. This module produces that name and parses template
//! parameter lists out of it.
//!
//! ## Nested template arguments
//!
//! Splitting a parameter list on commas is only correct when no argument is
//! itself templated: `boost::variant<std::map<int, std::string>, bar>` has
//! two alternatives, not three. [`split_template_args`] tracks bracket depth
//! so nested arguments stay intact.

use smallvec::SmallVec;

use crate::host::TypeDescriptor;

/// Parsed template arguments; wrapper shapes rarely carry more than a few.
pub type TemplateArgs = SmallVec<[String; 4]>;

/// Reduce a type descriptor to its canonical form.
///
/// Follows exactly one level of reference (so a `T&` handed over by the host
/// matches visualizers for `T`), then resolves typedef aliases and strips
/// qualifiers.
pub fn canonicalize(ty: &dyn TypeDescriptor) -> Box<dyn TypeDescriptor>
{
    let ty = if ty.is_reference() {
        ty.target_type().unwrap_or_else(|| ty.clone_box())
    } else {
        ty.clone_box()
    };

    ty.strip_typedefs_and_qualifiers()
}

/// Extract the template argument list from a canonical type name.
///
/// Returns the arguments between the outermost angle brackets, split at top
/// level. `None` if the name carries no template parameter list or the
/// brackets are unbalanced.
///
/// ## Example
///
/// ```rust
/// use lens_core::typename::template_args;
///
/// let args = template_args("boost::variant<std::map<int, int>, bool>").unwrap();
/// assert_eq!(args.as_slice(), ["std::map<int, int>", "bool"]);
/// ```
pub fn template_args(name: &str) -> Option<TemplateArgs>
{
    let open = name.find('<')?;
    let close = name.rfind('>')?;
    if close <= open {
        return None;
    }

    Some(split_template_args(&name[open + 1..close]))
}

/// Split a template parameter list at top-level commas.
///
/// Tracks `<>` and `()` depth so that nested template arguments and function
/// types survive intact. Arguments are trimmed; empty input produces an
/// empty list.
pub fn split_template_args(inner: &str) -> TemplateArgs
{
    let mut args = TemplateArgs::new();
    let mut depth: u32 = 0;
    let mut start = 0;

    for (pos, ch) in inner.char_indices() {
        match ch {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                push_arg(&mut args, &inner[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    push_arg(&mut args, &inner[start..]);

    args
}

fn push_arg(args: &mut TemplateArgs, raw: &str)
{
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        args.push(trimmed.to_string());
    }
}
