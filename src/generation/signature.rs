//! Composition helpers for methods that mirror an interface method.
//!
//! Parameters of generated overrides are named `v0, v1, ...` and captured
//! results `r0, r1, ...`, so a body can forward a call to an inner value
//! and hand its results back unchanged.

use super::file::{FuncDecl, GoFile};
use crate::core::Method;

/// Rendered parameter types of `method`.
///
/// The final parameter of a variadic method renders as `...T` unless
/// `omit_dots` is set, in which case it stays `[]T`.
pub fn param_types(
    file: &mut GoFile,
    method: &Method,
    import_path: &str,
    omit_dots: bool,
) -> Vec<String> {
    let variadic = method.variadic_index();

    method
        .params
        .iter()
        .enumerate()
        .map(|(i, ty)| file.render_type(ty, import_path, !omit_dots && variadic == Some(i)))
        .collect()
}

/// Rendered result types of `method`.
pub fn result_types(file: &mut GoFile, method: &Method, import_path: &str) -> Vec<String> {
    method
        .results
        .iter()
        .map(|ty| file.render_type(ty, import_path, false))
        .collect()
}

/// Parameters named `v0 T0, v1 T1, ...`.
pub fn override_params(file: &mut GoFile, method: &Method, import_path: &str) -> Vec<String> {
    param_types(file, method, import_path, false)
        .into_iter()
        .enumerate()
        .map(|(i, ty)| format!("v{} {}", i, ty))
        .collect()
}

/// Call the same-named method on `receiver`, capturing any results.
///
/// `r0, r1 := m.Get(v0, v1...)`
pub fn super_call(method: &Method, receiver: &str) -> String {
    let variadic = method.variadic_index();
    let args: Vec<String> = (0..method.params.len())
        .map(|i| {
            if variadic == Some(i) {
                format!("v{}...", i)
            } else {
                format!("v{}", i)
            }
        })
        .collect();

    let call = format!("{}.{}({})", receiver, method.name, args.join(", "));
    if method.results.is_empty() {
        return call;
    }

    format!("{} := {}", result_names(method).join(", "), call)
}

/// Return the results captured by [`super_call`].
pub fn super_return(method: &Method) -> String {
    if method.results.is_empty() {
        return "return".to_string();
    }
    format!("return {}", result_names(method).join(", "))
}

fn result_names(method: &Method) -> Vec<String> {
    (0..method.results.len()).map(|i| format!("r{}", i)).collect()
}

/// A plain function.
pub fn function(name: &str, params: Vec<String>, results: Vec<String>, body: Vec<String>) -> FuncDecl {
    FuncDecl {
        receiver: None,
        name: name.to_string(),
        params,
        results,
        body,
    }
}

/// A method on `*struct_name`.
pub fn method(
    receiver: &str,
    struct_name: &str,
    name: &str,
    params: Vec<String>,
    results: Vec<String>,
    body: Vec<String>,
) -> FuncDecl {
    FuncDecl {
        receiver: Some((receiver.to_string(), format!("*{}", struct_name))),
        name: name.to_string(),
        params,
        results,
        body,
    }
}

/// A method on `*struct_name` with the signature of `iface_method`.
pub fn override_method(
    file: &mut GoFile,
    receiver: &str,
    struct_name: &str,
    import_path: &str,
    iface_method: &Method,
    body: Vec<String>,
) -> FuncDecl {
    let params = override_params(file, iface_method, import_path);
    let results = result_types(file, iface_method, import_path);
    method(receiver, struct_name, &iface_method.name, params, results, body)
}
