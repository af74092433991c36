//! Operator reference for the rowfilter CLI

use crate::ComparisonOp;

/// Reference text listing every operator and the filter syntax.
pub fn get_operators_reference() -> String {
    let mut out = String::from("ROWFILTER OPERATORS\n\nComparison (field<op>literal):\n");

    for op in ComparisonOp::ALL {
        out.push_str(&format!("  {:<4}{}\n", op.symbol(), op.description()));
    }

    out.push_str(
        r#"
Connectives:
  &   AND, binds tighter than |
  |   OR

Fields are dotted paths (user.address.city, items.0.sku). Missing and null
fields compare as the empty string, so `field==` matches them.

  echo '{"a": "b", "c": "d"}' | rowfilter check 'a==b&c==d'
  => true

  echo '[{"n": 5}, {"n": 12}]' | rowfilter check 'n>10'
  => [{"n":12}]

Literals cannot contain & or |, and there is no grouping syntax.
"#,
    );
    out
}
