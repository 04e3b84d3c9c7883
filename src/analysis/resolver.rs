use crate::error::ResolutionRule;

/// Resolve an activity's `android:name` against a namespace.
///
/// - `.Foo` is relative: the namespace is prepended and must be known
/// - `Foo` (no dot) lives in the namespace when there is one
/// - anything else with a dot is already fully qualified
pub fn resolve_class_name(namespace: &str, raw: &str) -> Result<String, ResolutionRule> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ResolutionRule::EmptyClassName);
    }

    let resolved = if raw.starts_with('.') {
        if namespace.is_empty() {
            return Err(ResolutionRule::RelativeWithoutNamespace);
        }
        format!("{}{}", namespace, raw)
    } else if !raw.contains('.') {
        if namespace.is_empty() {
            raw.to_string()
        } else {
            format!("{}.{}", namespace, raw)
        }
    } else {
        raw.to_string()
    };

    if is_class_name(&resolved) {
        Ok(resolved)
    } else {
        Err(ResolutionRule::InvalidClassName(resolved))
    }
}

/// The module's build namespace wins; legacy modules fall back to the
/// manifest's own `package` attribute.
pub fn effective_namespace<'a>(module_namespace: &'a str, manifest_package: Option<&'a str>) -> &'a str {
    if !module_namespace.is_empty() {
        module_namespace
    } else {
        manifest_package.map(str::trim).unwrap_or("")
    }
}

/// A Kotlin/Java identifier without `$`
pub fn is_identifier(s: &str) -> bool {
    is_segment(s, false)
}

/// A dotted path of identifiers, e.g. a package name
pub fn is_qualified_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(is_identifier)
}

/// Like [`is_qualified_name`] but nested classes (`Outer$Inner`) are allowed
fn is_class_name(s: &str) -> bool {
    !s.is_empty() && s.split('.').all(|segment| is_segment(segment, true))
}

fn is_segment(s: &str, allow_dollar: bool) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let valid = |c: char| c.is_alphanumeric() || c == '_' || (allow_dollar && c == '$');
    !first.is_numeric() && valid(first) && chars.all(valid)
}
