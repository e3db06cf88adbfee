//! Record to class desugaring
//!
//! Expands a parsed `RecordDecl` into its final class definition: one
//! field and one public accessor per component, a constructor that
//! assigns every component and then runs the initializer block, and the
//! four value-object members (string form, identity hash, ordered
//! comparison, decomposition) injected wherever the body has no member
//! under the same key.
//!
//! The transform is a single linear pass per declaration. It never
//! mutates its input; re-running it on the same declaration produces a
//! structurally identical class.

use crate::synth::{self, WellKnown};
use quill_parser::ast::*;
use quill_parser::interner::Interner;

/// AST-to-AST expander for record declarations.
///
/// Holds the interner so synthesized members can introduce names, plus
/// the interned well-known names shared by all expansions.
pub struct Expander<'a> {
    interner: &'a mut Interner,
    names: WellKnown,
}

impl<'a> Expander<'a> {
    /// Create a new expander over the parse interner.
    pub fn new(interner: &'a mut Interner) -> Self {
        let names = WellKnown::new(interner);
        Self { interner, names }
    }

    /// Expand every record declaration and anonymous-record expression
    /// in a module.
    pub fn expand_module(&mut self, module: &Module) -> Module {
        Module {
            statements: module
                .statements
                .iter()
                .map(|stmt| self.rewrite_statement(stmt))
                .collect(),
            span: module.span,
        }
    }

    /// Expand one record declaration into its final class definition.
    pub fn expand_record(&mut self, decl: &RecordDecl) -> ClassDecl {
        let span = decl.span;
        let simple_name = decl.name.display_name(self.interner);

        // Working body: the user's members, minus the initializer entry
        // which is spliced into the constructor tail below
        let mut body = decl.body.clone();
        let init_statements = match body.remove(&MemberKey::Initializer) {
            Some(RecordMember::Initializer(statements)) => statements,
            _ => Vec::new(),
        };

        let mut ctor_params = Vec::with_capacity(decl.components.len());
        let mut ctor_body = Vec::with_capacity(decl.components.len());

        // Per-component fragments, all in declaration order: display
        // parts for toString, this.<c> for hashing/comparison, and
        // value.<c> for the comparison candidate
        let mut display = Vec::with_capacity(decl.components.len() * 2 + 1);
        let mut identity = Vec::with_capacity(decl.components.len());
        let mut candidate = Vec::with_capacity(decl.components.len());

        for (i, component) in decl.components.iter().enumerate() {
            let cspan = component.span;
            let name = component.name.name;

            // Field visibility: explicit modifier list if given, else a
            // single private modifier; readonly passes through
            let (visibility, is_readonly) = resolve_modifiers(component.modifiers.as_deref());

            // Variadic components are stored and returned as arrays
            let storage = storage_type(component);

            // Field declaration; defaults live on the constructor
            // parameter, not the field
            body.insert(
                MemberKey::Property(name),
                RecordMember::Property(FieldDecl {
                    annotations: Vec::new(),
                    visibility,
                    is_readonly,
                    name: component.name.clone(),
                    type_annotation: storage.clone(),
                    initializer: None,
                    span: cspan,
                }),
            );

            // Zero-argument public accessor
            body.insert(
                MemberKey::Method(name, 0),
                RecordMember::Method(synth::accessor(name, storage, cspan)),
            );

            // Constructor parameter and field assignment, in component
            // order; default expressions are evaluated by the parameter
            // mechanism, not here
            ctor_params.push(Parameter {
                name: component.name.clone(),
                type_annotation: component.ty.clone(),
                default_value: component.default_value.clone(),
                variadic: component.variadic,
                span: cspan,
            });
            ctor_body.push(synth::field_assignment(name, cspan));

            // Fragments for the injected members
            let label = if i == 0 {
                format!("{}({}: ", simple_name, self.interner.resolve(name))
            } else {
                format!(", {}: ", self.interner.resolve(name))
            };
            let label = self.interner.intern(&label);
            display.push(synth::string_literal(label, cspan));
            display.push(synth::values_call(
                &self.names,
                self.names.describe,
                vec![synth::this_member(name, cspan)],
                cspan,
            ));

            identity.push(synth::this_member(name, cspan));
            candidate.push(synth::member(
                synth::ident(self.names.value_param, cspan),
                name,
                cspan,
            ));
        }

        if decl.components.is_empty() {
            let label = self.interner.intern(&format!("{}()", simple_name));
            display.push(synth::string_literal(label, span));
        } else {
            let close = self.interner.intern(")");
            display.push(synth::string_literal(close, span));
        }

        // Splice the initializer into the constructor tail, then install
        // the constructor under its reserved key. This is the one member
        // that bypasses inject-if-absent.
        ctor_body.extend(init_statements);
        body.insert(
            MemberKey::Constructor,
            RecordMember::Constructor(ConstructorDecl {
                params: ctor_params,
                body: BlockStatement {
                    statements: ctor_body,
                    span,
                },
                span,
            }),
        );

        let seed = synth::string_literal(self.interner.intern(&simple_name), span);
        self.inject_value_members(&mut body, seed, display, identity, candidate, span);

        ClassDecl {
            annotations: decl.annotations.clone(),
            comment: decl.comment,
            is_final: true,
            name: match &decl.name {
                RecordName::Named(name) => Some(name.clone()),
                RecordName::Anonymous(_) => None,
            },
            extends: decl.extends.clone(),
            implements: std::iter::once(synth::value_interface(&self.names, span))
                .chain(decl.implements.iter().cloned())
                .collect(),
            members: into_class_members(body),
            span,
        }
    }

    /// Expand an anonymous record: route the synthetic declaration
    /// through the ordinary transform and wrap the result in an
    /// instantiation expression carrying the original call arguments.
    pub fn expand_new_record(&mut self, expr: &NewRecordExpression) -> NewClassExpression {
        let class = self.expand_record(&expr.definition);
        // User-written member bodies may themselves contain anonymous
        // records
        let class = self.rewrite_class(class);

        NewClassExpression {
            definition: Box::new(class),
            arguments: expr
                .arguments
                .iter()
                .map(|arg| self.rewrite_expression(&arg.value))
                .collect(),
            span: expr.span,
        }
    }

    /// Inject the four value-object members wherever the body has no
    /// member under the same key. A user override always wins.
    fn inject_value_members(
        &mut self,
        body: &mut RecordBody,
        seed: Expression,
        display: Vec<Expression>,
        identity: Vec<Expression>,
        candidate: Vec<Expression>,
        span: quill_parser::token::Span,
    ) {
        let names = &self.names;

        // String representation: "Name(c1: v1, c2: v2, ...)"
        body.insert_if_absent(
            MemberKey::Method(names.to_string, 0),
            RecordMember::Method(synth::public_method(
                names.to_string,
                Vec::new(),
                Some(synth::primitive_type(PrimitiveType::String, span)),
                vec![synth::return_stmt(synth::concat(display, span), span)],
                span,
            )),
        );

        // Identity hash: contentHash(combineHashes(name, v1, ..., vn))
        let mut hash_args = Vec::with_capacity(identity.len() + 1);
        hash_args.push(seed);
        hash_args.extend(identity.iter().cloned());
        let digest = synth::values_call(
            names,
            names.content_hash,
            vec![synth::values_call(names, names.combine_hashes, hash_args, span)],
            span,
        );
        body.insert_if_absent(
            MemberKey::Method(names.hash_code, 0),
            RecordMember::Method(synth::public_method(
                names.hash_code,
                Vec::new(),
                Some(synth::primitive_type(PrimitiveType::String, span)),
                vec![synth::return_stmt(digest, span)],
                span,
            )),
        );

        // Ordered comparison: lexicographic over the component tuples
        // when the runtime types match, the fixed "greater" constant
        // otherwise
        let comparison = Expression::Conditional(ConditionalExpression {
            test: Box::new(synth::instanceof_self(
                names,
                synth::ident(names.value_param, span),
                span,
            )),
            consequent: Box::new(synth::values_call(
                names,
                names.compare,
                vec![
                    synth::tuple(identity.clone(), span),
                    synth::tuple(candidate, span),
                ],
                span,
            )),
            alternate: Box::new(synth::int_literal(1, span)),
            span,
        });
        body.insert_if_absent(
            MemberKey::Method(names.compare_to, 1),
            RecordMember::Method(synth::public_method(
                names.compare_to,
                vec![synth::untyped_parameter(names.value_param, span)],
                Some(synth::primitive_type(PrimitiveType::Int, span)),
                vec![synth::return_stmt(comparison, span)],
                span,
            )),
        );

        // Decomposition: the tuple itself, or the mapper applied to it
        // positionally
        let decomposition = Expression::Conditional(ConditionalExpression {
            test: Box::new(Expression::Binary(BinaryExpression {
                operator: BinaryOperator::Equal,
                left: Box::new(synth::ident(names.map_param, span)),
                right: Box::new(Expression::NullLiteral(span)),
                span,
            })),
            consequent: Box::new(synth::tuple(identity.clone(), span)),
            alternate: Box::new(synth::call(
                synth::ident(names.map_param, span),
                identity,
                span,
            )),
            span,
        });
        body.insert_if_absent(
            MemberKey::Method(names.invoke, 1),
            RecordMember::Method(synth::public_method(
                names.invoke,
                vec![synth::mapper_parameter(names, span)],
                None,
                vec![synth::return_stmt(decomposition, span)],
                span,
            )),
        );
    }

    // ========================================================================
    // Module rewriting
    // ========================================================================

    fn rewrite_statement(&mut self, stmt: &Statement) -> Statement {
        match stmt {
            Statement::RecordDecl(decl) => {
                let class = self.expand_record(decl);
                Statement::ClassDecl(self.rewrite_class(class))
            }
            Statement::ClassDecl(class) => Statement::ClassDecl(self.rewrite_class(class.clone())),
            Statement::VariableDecl(decl) => Statement::VariableDecl(VariableDecl {
                kind: decl.kind,
                name: decl.name.clone(),
                initializer: decl
                    .initializer
                    .as_ref()
                    .map(|init| self.rewrite_expression(init)),
                span: decl.span,
            }),
            Statement::Expression(stmt) => Statement::Expression(ExpressionStatement {
                expression: self.rewrite_expression(&stmt.expression),
                span: stmt.span,
            }),
            Statement::If(stmt) => Statement::If(IfStatement {
                condition: self.rewrite_expression(&stmt.condition),
                then_branch: Box::new(self.rewrite_statement(&stmt.then_branch)),
                else_branch: stmt
                    .else_branch
                    .as_ref()
                    .map(|branch| Box::new(self.rewrite_statement(branch))),
                span: stmt.span,
            }),
            Statement::While(stmt) => Statement::While(WhileStatement {
                condition: self.rewrite_expression(&stmt.condition),
                body: Box::new(self.rewrite_statement(&stmt.body)),
                span: stmt.span,
            }),
            Statement::Return(stmt) => Statement::Return(ReturnStatement {
                value: stmt.value.as_ref().map(|v| self.rewrite_expression(v)),
                span: stmt.span,
            }),
            Statement::Throw(stmt) => Statement::Throw(ThrowStatement {
                value: self.rewrite_expression(&stmt.value),
                span: stmt.span,
            }),
            Statement::Block(block) => Statement::Block(self.rewrite_block(block)),
            Statement::Empty(span) => Statement::Empty(*span),
        }
    }

    fn rewrite_block(&mut self, block: &BlockStatement) -> BlockStatement {
        BlockStatement {
            statements: block
                .statements
                .iter()
                .map(|stmt| self.rewrite_statement(stmt))
                .collect(),
            span: block.span,
        }
    }

    fn rewrite_class(&mut self, class: ClassDecl) -> ClassDecl {
        let ClassDecl {
            annotations,
            comment,
            is_final,
            name,
            extends,
            implements,
            members,
            span,
        } = class;

        ClassDecl {
            annotations,
            comment,
            is_final,
            name,
            extends,
            implements,
            members: members
                .into_iter()
                .map(|member| match member {
                    ClassMember::Field(field) => {
                        let initializer = field
                            .initializer
                            .as_ref()
                            .map(|init| self.rewrite_expression(init));
                        ClassMember::Field(FieldDecl {
                            initializer,
                            ..field
                        })
                    }
                    ClassMember::Method(method) => {
                        let body = self.rewrite_block(&method.body);
                        ClassMember::Method(MethodDecl { body, ..method })
                    }
                    ClassMember::Constructor(ctor) => {
                        let body = self.rewrite_block(&ctor.body);
                        ClassMember::Constructor(ConstructorDecl { body, ..ctor })
                    }
                })
                .collect(),
            span,
        }
    }

    fn rewrite_expression(&mut self, expr: &Expression) -> Expression {
        match expr {
            Expression::NewRecord(inner) => Expression::NewClass(self.expand_new_record(inner)),
            Expression::NewClass(inner) => Expression::NewClass(NewClassExpression {
                definition: Box::new(self.rewrite_class((*inner.definition).clone())),
                arguments: inner
                    .arguments
                    .iter()
                    .map(|arg| self.rewrite_expression(arg))
                    .collect(),
                span: inner.span,
            }),
            Expression::Array(array) => Expression::Array(ArrayExpression {
                elements: array
                    .elements
                    .iter()
                    .map(|e| self.rewrite_expression(e))
                    .collect(),
                span: array.span,
            }),
            Expression::Unary(unary) => Expression::Unary(UnaryExpression {
                operator: unary.operator,
                operand: Box::new(self.rewrite_expression(&unary.operand)),
                span: unary.span,
            }),
            Expression::Binary(binary) => Expression::Binary(BinaryExpression {
                operator: binary.operator,
                left: Box::new(self.rewrite_expression(&binary.left)),
                right: Box::new(self.rewrite_expression(&binary.right)),
                span: binary.span,
            }),
            Expression::Logical(logical) => Expression::Logical(LogicalExpression {
                operator: logical.operator,
                left: Box::new(self.rewrite_expression(&logical.left)),
                right: Box::new(self.rewrite_expression(&logical.right)),
                span: logical.span,
            }),
            Expression::Assignment(assignment) => Expression::Assignment(AssignmentExpression {
                target: Box::new(self.rewrite_expression(&assignment.target)),
                value: Box::new(self.rewrite_expression(&assignment.value)),
                span: assignment.span,
            }),
            Expression::Conditional(conditional) => {
                Expression::Conditional(ConditionalExpression {
                    test: Box::new(self.rewrite_expression(&conditional.test)),
                    consequent: Box::new(self.rewrite_expression(&conditional.consequent)),
                    alternate: Box::new(self.rewrite_expression(&conditional.alternate)),
                    span: conditional.span,
                })
            }
            Expression::Call(call) => Expression::Call(CallExpression {
                callee: Box::new(self.rewrite_expression(&call.callee)),
                arguments: call
                    .arguments
                    .iter()
                    .map(|arg| self.rewrite_expression(arg))
                    .collect(),
                span: call.span,
            }),
            Expression::Member(member) => Expression::Member(MemberExpression {
                object: Box::new(self.rewrite_expression(&member.object)),
                property: member.property.clone(),
                span: member.span,
            }),
            Expression::Index(index) => Expression::Index(IndexExpression {
                object: Box::new(self.rewrite_expression(&index.object)),
                index: Box::new(self.rewrite_expression(&index.index)),
                span: index.span,
            }),
            Expression::New(new) => Expression::New(NewExpression {
                class: new.class.clone(),
                arguments: new
                    .arguments
                    .iter()
                    .map(|arg| self.rewrite_expression(arg))
                    .collect(),
                span: new.span,
            }),
            Expression::InstanceOf(instance_of) => Expression::InstanceOf(InstanceOfExpression {
                object: Box::new(self.rewrite_expression(&instance_of.object)),
                type_name: instance_of.type_name.clone(),
                span: instance_of.span,
            }),
            Expression::Parenthesized(paren) => {
                Expression::Parenthesized(ParenthesizedExpression {
                    expression: Box::new(self.rewrite_expression(&paren.expression)),
                    span: paren.span,
                })
            }
            // Leaves
            Expression::IntLiteral(_)
            | Expression::FloatLiteral(_)
            | Expression::StringLiteral(_)
            | Expression::BooleanLiteral(_)
            | Expression::NullLiteral(_)
            | Expression::Identifier(_)
            | Expression::This(_) => expr.clone(),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve a component's modifier list to field visibility and the
/// readonly flag. No list means the default single private modifier; an
/// explicit list without a visibility keyword gets the host default
/// (public).
fn resolve_modifiers(modifiers: Option<&[Modifier]>) -> (Visibility, bool) {
    match modifiers {
        None => (Visibility::Private, false),
        Some(list) => {
            let visibility = list
                .iter()
                .find_map(|modifier| match modifier {
                    Modifier::Public => Some(Visibility::Public),
                    Modifier::Protected => Some(Visibility::Protected),
                    Modifier::Private => Some(Visibility::Private),
                    Modifier::Readonly => None,
                })
                .unwrap_or_default();
            let readonly = list.contains(&Modifier::Readonly);
            (visibility, readonly)
        }
    }
}

/// The storage and accessor type of a component: arrays for variadic
/// components (untyped array when no type was declared), otherwise the
/// declared type unchanged.
fn storage_type(component: &Component) -> Option<TypeAnnotation> {
    if !component.variadic {
        return component.ty.clone();
    }

    let array = match &component.ty {
        Some(element) => ArrayType::of(element.clone()),
        None => ArrayType::untyped(),
    };
    let span = component
        .ty
        .as_ref()
        .map(|ty| ty.span)
        .unwrap_or(component.span);

    Some(TypeAnnotation {
        ty: Type::Array(array),
        span,
    })
}

/// Convert the merged body into the final member list, preserving
/// insertion order. The initializer entry was removed before merging.
fn into_class_members(body: RecordBody) -> Vec<ClassMember> {
    body.into_entries()
        .into_iter()
        .filter_map(|(_, member)| match member {
            RecordMember::Property(field) => Some(ClassMember::Field(field)),
            RecordMember::Method(method) => Some(ClassMember::Method(method)),
            RecordMember::Constructor(ctor) => Some(ClassMember::Constructor(ctor)),
            RecordMember::Initializer(_) => None,
        })
        .collect()
}
