//! Linear encodings of non-linear relations between binary variables.
use super::ProgramBuilder;
use super::Relation;
use super::VariableId;

/// Introduces a new binary variable `product` which is constrained to equal `a * b`.
///
/// The encoding adds the three constraints
///  - `product <= a`
///  - `product <= b`
///  - `product >= a + b - 1`
///
/// For binary `a` and `b` these admit exactly one value of `product` in every assignment, so the
/// encoding is exact at every integral point. This allows pairwise interaction costs between
/// binary variables to be expressed with a linear objective over the products.
pub fn binary_product(
    builder: &mut ProgramBuilder,
    a: VariableId,
    b: VariableId,
    name: impl Into<String>,
) -> VariableId {
    let product = builder.new_binary(name);

    builder.add_constraint([(1, product), (-1, a)], Relation::LessOrEqual, 0);
    builder.add_constraint([(1, product), (-1, b)], Relation::LessOrEqual, 0);
    builder.add_constraint(
        [(1, product), (-1, a), (-1, b)],
        Relation::GreaterOrEqual,
        -1,
    );

    product
}
