use super::RowKey;

#[test]
fn orders_by_table_then_row() {
  let mut keys =
    vec![RowKey::new("b_members", "x"), RowKey::new("a_members", "z"), RowKey::new("a_members", "a")];
  keys.sort();
  assert_eq!(keys, vec![
    RowKey::new("a_members", "a"),
    RowKey::new("a_members", "z"),
    RowKey::new("b_members", "x"),
  ]);
}

#[test]
fn display_joins_table_and_row() {
  assert_eq!(RowKey::new("table_version", "myCluster").to_string(), "table_version/myCluster");
}
