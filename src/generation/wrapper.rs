//! The decorator generator shipped with the `genlib` binary.
//!
//! For each interface it emits a struct holding an inner implementation,
//! a constructor, and one method per interface method that forwards the
//! call and returns the inner results unchanged.

use super::emit::InterfaceGenerator;
use super::file::{GoFile, StructDecl};
use super::signature::{function, override_method, super_call, super_return};
use crate::core::Interface;

const RECEIVER: &str = "w";
const INNER_FIELD: &str = "inner";

/// Generates forwarding wrappers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WrapperGenerator;

impl WrapperGenerator {
    /// Name of the wrapper struct for `iface`.
    pub fn struct_name(iface: &Interface, prefix: &str) -> String {
        format!("{}{}Wrapper", prefix, iface.name)
    }
}

impl InterfaceGenerator for WrapperGenerator {
    fn generate(&self, file: &mut GoFile, iface: &Interface, prefix: &str) {
        let struct_name = Self::struct_name(iface, prefix);
        let iface_type = file.qualify(&iface.import_path, &iface.name);

        file.add_struct(StructDecl {
            name: struct_name.clone(),
            fields: vec![(INNER_FIELD.to_string(), iface_type.clone())],
        });

        file.add_func(function(
            &format!("New{}", struct_name),
            vec![format!("{} {}", INNER_FIELD, iface_type)],
            vec![format!("*{}", struct_name)],
            vec![format!("return &{}{{{}: {}}}", struct_name, INNER_FIELD, INNER_FIELD)],
        ));

        let target = format!("{}.{}", RECEIVER, INNER_FIELD);
        for method in &iface.methods {
            let mut body = vec![super_call(method, &target)];
            if !method.results.is_empty() {
                body.push(super_return(method));
            }

            let decl = override_method(
                file,
                RECEIVER,
                &struct_name,
                &iface.import_path,
                method,
                body,
            );
            file.add_func(decl);
        }
    }
}

/// File name used for each interface in directory mode.
pub fn wrapper_filename(interface_name: &str) -> String {
    format!("{}.go", interface_name)
}
