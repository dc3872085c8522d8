//! Translation of a [`FilterSpec`] into a parameterised SQL `WHERE` clause.

use reviewdash_core::filter::FilterSpec;

/// A `WHERE` clause (possibly empty) and its positional parameters.
pub struct WhereClause {
  pub sql:    String,
  pub params: Vec<String>,
}

/// Build `WHERE col IN (?1, ?2) AND other IN (?3)` for the active dimensions.
///
/// Column names come from [`Dimension::as_str`](reviewdash_core::filter::Dimension::as_str),
/// never from caller input; values are always bound.
pub fn where_clause(filter: &FilterSpec) -> WhereClause {
  let mut conds = Vec::new();
  let mut params = Vec::new();

  for (dim, values) in filter.active() {
    let placeholders: Vec<String> = values
      .iter()
      .map(|v| {
        params.push(v.clone());
        format!("?{}", params.len())
      })
      .collect();
    conds.push(format!("{} IN ({})", dim.as_str(), placeholders.join(", ")));
  }

  let sql = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };

  WhereClause { sql, params }
}

#[cfg(test)]
mod tests {
  use reviewdash_core::filter::Dimension;

  use super::*;

  #[test]
  fn unrestricted_filter_has_no_where() {
    let w = where_clause(&FilterSpec::new().with(Dimension::Model, ["All"]));
    assert!(w.sql.is_empty());
    assert!(w.params.is_empty());
  }

  #[test]
  fn dimensions_are_anded_values_ored() {
    let spec = FilterSpec::new()
      .with(Dimension::Cuisine, ["Thai", "Mexican"])
      .with(Dimension::IsLocal, ["yes"]);
    let w = where_clause(&spec);
    assert_eq!(w.sql, "WHERE cuisine IN (?1, ?2) AND is_local IN (?3)");
    assert_eq!(w.params, ["Mexican", "Thai", "yes"]);
  }
}
