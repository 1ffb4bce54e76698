//! Rust source to type descriptors
//!
//! Reads declarations only: trait signatures, struct and enum variant
//! fields, associated consts of `impl` blocks, `use` imports and marker
//! attributes. No code in the artifact is compiled or run.

use crate::markers::MarkerSet;
use quote::ToTokens;
use std::collections::{HashMap, HashSet};
use svcreg_domain::constants::{
    AUTO_TRAIT_BOUNDS, CRATE_SEGMENT, ENABLE_ROOTS_ARGUMENT, SELF_SEGMENT, SUPER_SEGMENT,
    TRANSPARENT_WRAPPERS,
};
use svcreg_domain::{
    ArtifactRef, ContractIdentity, DeclaredType, Error, FieldDescriptor, MethodSignature,
    Namespace, Receiver, Result, TypeDescriptor, TypeKind,
};
use syn::{
    Attribute, Fields, FnArg, GenericArgument, ImplItem, Item, PathArguments, ReturnType,
    TraitItem, Type, TypeParamBound, UseTree,
};

/// Parse one artifact into the descriptors of every type it declares
///
/// Syntax errors are reported as `Error::UnreadableArtifact`; a malformed
/// enabling marker is a configuration error.
pub fn parse_artifact(
    artifact: &ArtifactRef,
    content: &str,
    crate_root: &Namespace,
    markers: &MarkerSet,
) -> Result<Vec<TypeDescriptor>> {
    let file = syn::parse_file(content)
        .map_err(|e| Error::unreadable_artifact(&artifact.location, e.to_string()))?;

    let parser = ArtifactParser {
        artifact,
        crate_root,
        markers,
    };
    let mut descriptors = Vec::new();
    parser.collect_items(&file.items, &artifact.namespace, &mut descriptors)?;
    Ok(descriptors)
}

struct ArtifactParser<'a> {
    artifact: &'a ArtifactRef,
    crate_root: &'a Namespace,
    markers: &'a MarkerSet,
}

impl ArtifactParser<'_> {
    fn collect_items(
        &self,
        items: &[Item],
        namespace: &Namespace,
        out: &mut Vec<TypeDescriptor>,
    ) -> Result<()> {
        let scope = ModuleScope::new(items, namespace, self.crate_root);
        let first = out.len();
        let mut static_fields = Vec::new();

        for item in items {
            match item {
                Item::Trait(item) => {
                    let mut descriptor =
                        self.describe(namespace, &item.ident, TypeKind::Trait, &item.attrs)?;
                    descriptor.methods = item.items.iter().filter_map(trait_method).collect();
                    out.push(descriptor);
                }
                Item::Struct(item) => {
                    let mut descriptor =
                        self.describe(namespace, &item.ident, TypeKind::Struct, &item.attrs)?;
                    descriptor.fields =
                        self.instance_fields(&descriptor.identity, None, &item.fields, &scope);
                    out.push(descriptor);
                }
                Item::Union(item) => {
                    let mut descriptor =
                        self.describe(namespace, &item.ident, TypeKind::Union, &item.attrs)?;
                    let fields = Fields::Named(item.fields.clone());
                    descriptor.fields =
                        self.instance_fields(&descriptor.identity, None, &fields, &scope);
                    out.push(descriptor);
                }
                Item::Enum(item) => {
                    let mut descriptor =
                        self.describe(namespace, &item.ident, TypeKind::Enum, &item.attrs)?;
                    descriptor.fields = item
                        .variants
                        .iter()
                        .flat_map(|variant| {
                            self.instance_fields(
                                &descriptor.identity,
                                Some(&variant.ident),
                                &variant.fields,
                                &scope,
                            )
                        })
                        .collect();
                    out.push(descriptor);
                }
                Item::Impl(item) => {
                    let owner = match impl_target(&item.self_ty) {
                        Some(segments) => {
                            ContractIdentity::new(scope.resolve(&segments).to_string())
                        }
                        None => {
                            ContractIdentity::in_namespace(namespace, &render_type(&item.self_ty))
                        }
                    };
                    if self.markers.is_contract(&item.attrs) {
                        let mut marked = self.placeholder(&owner);
                        marked.contract_marked = true;
                        out.push(marked);
                    }
                    for impl_item in &item.items {
                        if let ImplItem::Const(constant) = impl_item {
                            static_fields.push(FieldDescriptor {
                                owner: owner.clone(),
                                name: constant.ident.to_string(),
                                is_static: true,
                                declared_type: scope.declared_type(&constant.ty),
                                injected: self.markers.is_inject(&constant.attrs),
                            });
                        }
                    }
                }
                Item::Type(item) => {
                    let kind = TypeKind::TypeAlias;
                    self.describe_marked(namespace, &item.ident, kind, &item.attrs, out)?;
                }
                Item::Fn(item) => {
                    let kind = TypeKind::Function;
                    self.describe_marked(namespace, &item.sig.ident, kind, &item.attrs, out)?;
                }
                Item::Const(item) => {
                    let kind = TypeKind::Const;
                    self.describe_marked(namespace, &item.ident, kind, &item.attrs, out)?;
                }
                Item::Static(item) => {
                    let kind = TypeKind::Static;
                    self.describe_marked(namespace, &item.ident, kind, &item.attrs, out)?;
                }
                Item::Mod(item) => {
                    if let Some((_, inner)) = &item.content {
                        self.collect_items(inner, &namespace.child(item.ident.to_string()), out)?;
                    }
                }
                _ => {}
            }
        }

        // Associated consts belong to a type declared in this module, or to
        // one declared elsewhere that only this impl block reveals.
        for field in static_fields {
            match out[first..].iter_mut().find(|d| d.identity == field.owner) {
                Some(owner) => owner.fields.push(field),
                None => {
                    let mut owner = self.placeholder(&field.owner);
                    owner.fields.push(field);
                    out.push(owner);
                }
            }
        }

        Ok(())
    }

    /// Descriptor for a type known only through an `impl` block
    fn placeholder(&self, owner: &ContractIdentity) -> TypeDescriptor {
        TypeDescriptor::new(
            owner.namespace(),
            owner.simple_name(),
            TypeKind::Impl,
            &self.artifact.location,
        )
    }

    /// Describe a non-type item only if it carries the contract marker
    fn describe_marked(
        &self,
        namespace: &Namespace,
        ident: &syn::Ident,
        kind: TypeKind,
        attrs: &[Attribute],
        out: &mut Vec<TypeDescriptor>,
    ) -> Result<()> {
        if self.markers.is_contract(attrs) {
            out.push(self.describe(namespace, ident, kind, attrs)?);
        }
        Ok(())
    }

    fn describe(
        &self,
        namespace: &Namespace,
        ident: &syn::Ident,
        kind: TypeKind,
        attrs: &[Attribute],
    ) -> Result<TypeDescriptor> {
        let mut descriptor = TypeDescriptor::new(
            namespace.clone(),
            &ident.to_string(),
            kind,
            &self.artifact.location,
        );
        descriptor.contract_marked = self.markers.is_contract(attrs);
        descriptor.enable_roots = self.enable_roots(attrs)?;
        Ok(descriptor)
    }

    /// Instance fields of a struct, a union or one enum variant
    fn instance_fields(
        &self,
        owner: &ContractIdentity,
        variant: Option<&syn::Ident>,
        fields: &Fields,
        scope: &ModuleScope<'_>,
    ) -> Vec<FieldDescriptor> {
        fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let name = field
                    .ident
                    .as_ref()
                    .map_or_else(|| index.to_string(), ToString::to_string);
                FieldDescriptor {
                    owner: owner.clone(),
                    name: match variant {
                        Some(variant) => format!("{variant}::{name}"),
                        None => name,
                    },
                    is_static: false,
                    declared_type: scope.declared_type(&field.ty),
                    injected: self.markers.is_inject(&field.attrs),
                }
            })
            .collect()
    }

    /// `#[enable_contracts]` or `#[enable_contracts(roots = ["a::b", "c"])]`
    fn enable_roots(&self, attrs: &[Attribute]) -> Result<Option<Vec<String>>> {
        let Some(attr) = self.markers.enabling(attrs) else {
            return Ok(None);
        };
        let mut roots = Vec::new();
        if let syn::Meta::List(_) = &attr.meta {
            attr.parse_nested_meta(|meta| {
                if !meta.path.is_ident(ENABLE_ROOTS_ARGUMENT) {
                    return Err(meta.error("unsupported argument"));
                }
                let array: syn::ExprArray = meta.value()?.parse()?;
                for element in array.elems {
                    match element {
                        syn::Expr::Lit(syn::ExprLit {
                            lit: syn::Lit::Str(root),
                            ..
                        }) => roots.push(root.value()),
                        other => {
                            return Err(syn::Error::new_spanned(
                                other,
                                "roots must be string literals",
                            ));
                        }
                    }
                }
                Ok(())
            })
            .map_err(|e| {
                Error::config(format!(
                    "malformed enabling marker in {}: {e}",
                    self.artifact.location
                ))
            })?;
        }
        Ok(Some(roots))
    }
}

/// Name lookup state of one module body
struct ModuleScope<'a> {
    namespace: &'a Namespace,
    crate_root: &'a Namespace,
    child_modules: HashSet<String>,
    imports: HashMap<String, Namespace>,
}

impl<'a> ModuleScope<'a> {
    fn new(items: &[Item], namespace: &'a Namespace, crate_root: &'a Namespace) -> Self {
        let child_modules = items
            .iter()
            .filter_map(|item| match item {
                Item::Mod(module) => Some(module.ident.to_string()),
                _ => None,
            })
            .collect();

        let mut scope = Self {
            namespace,
            crate_root,
            child_modules,
            imports: HashMap::new(),
        };

        let mut flat = Vec::new();
        for item in items {
            if let Item::Use(item) = item {
                flatten_use(&item.tree, &mut Vec::new(), &mut flat);
            }
        }
        for (alias, path) in flat {
            let target = scope.anchor(&path);
            scope.imports.insert(alias, target);
        }
        scope
    }

    fn declared_type(&self, ty: &Type) -> DeclaredType {
        let written = render_type(ty);
        match target_path(ty) {
            Some((segments, is_dyn)) => {
                let resolved = self.resolve(&segments);
                DeclaredType::new(written, ContractIdentity::new(resolved.to_string()), is_dyn)
            }
            None => {
                let resolved = ContractIdentity::new(&written);
                DeclaredType::new(written, resolved, false)
            }
        }
    }

    fn resolve(&self, segments: &[String]) -> Namespace {
        let Some(first) = segments.first() else {
            return self.namespace.clone();
        };
        if let Some(import) = self.imports.get(first) {
            return import.join(&segments[1..]);
        }
        if segments.len() == 1 {
            return self.namespace.child(first.clone());
        }
        self.anchor(segments)
    }

    /// Resolve a path by its first segment alone
    fn anchor(&self, segments: &[String]) -> Namespace {
        let Some(first) = segments.first() else {
            return self.namespace.clone();
        };
        match first.as_str() {
            CRATE_SEGMENT => self.crate_root.join(&segments[1..]),
            SELF_SEGMENT => self.namespace.join(&segments[1..]),
            SUPER_SEGMENT => {
                let mut base = self.namespace.clone();
                let mut rest = segments;
                while rest.first().is_some_and(|s| s == SUPER_SEGMENT) {
                    base = base.parent().unwrap_or_default();
                    rest = &rest[1..];
                }
                base.join(rest)
            }
            name if self.child_modules.contains(name) => self.namespace.join(segments),
            _ => Namespace::from_segments(segments.iter().cloned()),
        }
    }
}

/// Flatten a `use` tree into `(alias, path)` pairs; globs are ignored
fn flatten_use(tree: &UseTree, prefix: &mut Vec<String>, out: &mut Vec<(String, Vec<String>)>) {
    match tree {
        UseTree::Path(path) => {
            prefix.push(path.ident.to_string());
            flatten_use(&path.tree, prefix, out);
            prefix.pop();
        }
        UseTree::Name(name) => {
            if name.ident == SELF_SEGMENT {
                if let Some(last) = prefix.last() {
                    out.push((last.clone(), prefix.clone()));
                }
            } else {
                let mut path = prefix.clone();
                path.push(name.ident.to_string());
                out.push((name.ident.to_string(), path));
            }
        }
        UseTree::Rename(rename) => {
            let mut path = prefix.clone();
            if rename.ident != SELF_SEGMENT {
                path.push(rename.ident.to_string());
            }
            out.push((rename.rename.to_string(), path));
        }
        UseTree::Glob(_) => {}
        UseTree::Group(group) => {
            for item in &group.items {
                flatten_use(item, prefix, out);
            }
        }
    }
}

/// Path of the type behind references, smart pointers and `dyn`
fn target_path(ty: &Type) -> Option<(Vec<String>, bool)> {
    match ty {
        Type::Reference(reference) => target_path(&reference.elem),
        Type::Paren(paren) => target_path(&paren.elem),
        Type::Group(group) => target_path(&group.elem),
        Type::TraitObject(object) => object.bounds.iter().find_map(|bound| match bound {
            TypeParamBound::Trait(bound) => {
                let segments = path_segments(&bound.path);
                let auto = segments
                    .last()
                    .is_some_and(|last| AUTO_TRAIT_BOUNDS.contains(&last.as_str()));
                (!auto).then_some((segments, true))
            }
            _ => None,
        }),
        Type::Path(path) if path.qself.is_none() => {
            let last = path.path.segments.last()?;
            if TRANSPARENT_WRAPPERS.contains(&last.ident.to_string().as_str()) {
                if let PathArguments::AngleBracketed(args) = &last.arguments {
                    if let Some(GenericArgument::Type(inner)) = args.args.first() {
                        return target_path(inner);
                    }
                }
            }
            Some((path_segments(&path.path), false))
        }
        _ => None,
    }
}

fn path_segments(path: &syn::Path) -> Vec<String> {
    path.segments.iter().map(|s| s.ident.to_string()).collect()
}

/// Path of the type an `impl` block is for, wrappers kept
fn impl_target(ty: &Type) -> Option<Vec<String>> {
    match ty {
        Type::Path(path) if path.qself.is_none() => Some(path_segments(&path.path)),
        Type::Paren(paren) => impl_target(&paren.elem),
        Type::Group(group) => impl_target(&group.elem),
        Type::TraitObject(_) => target_path(ty).map(|(segments, _)| segments),
        _ => None,
    }
}

fn trait_method(item: &TraitItem) -> Option<MethodSignature> {
    let TraitItem::Fn(method) = item else {
        return None;
    };
    let receiver = match method.sig.receiver() {
        None => Receiver::None,
        Some(r) if r.reference.is_none() => Receiver::Owned,
        Some(r) if r.mutability.is_some() => Receiver::RefMut,
        Some(_) => Receiver::Ref,
    };
    Some(MethodSignature {
        name: method.sig.ident.to_string(),
        receiver,
        params: method
            .sig
            .inputs
            .iter()
            .filter_map(|arg| match arg {
                FnArg::Typed(typed) => Some(render_type(&typed.ty)),
                FnArg::Receiver(_) => None,
            })
            .collect(),
        returns: match &method.sig.output {
            ReturnType::Default => None,
            ReturnType::Type(_, ty) => Some(render_type(ty)),
        },
        has_default: method.default.is_some(),
    })
}

/// Source-like rendering of a type (`Arc<dyn Greeter + Send>`)
pub fn render_type(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}
