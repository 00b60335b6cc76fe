//! Unit tests for the table transformer.

use super::*;
use crate::table::read_csv;

const ECHO_EXPORT: &str = "\
Reg Qty,Foil Qty,Name,Set,Rarity,Acquired,Language,Date Acquired,Set Code,Collector Number,Condition,Marked as Trade,note,tcg_market,tcg_mid,tcg_low,foil_price,echo_inventory_id,tcgid,echoid
1,0,Lightning Bolt,Magic 2011,common,0.50,EN,2023-05-01,M11,149,NM,0,,1.20,1.00,0.80,3.00,111,222,333
0,1,Scroll Rack - 1998 Brian Selden,The List,rare,2.00,EN,2023-05-01,PLIST,1,LP,0,,4.00,3.50,3.00,0,112,223,334
2,0,Arena (Promo) - JP Full Art,Media Inserts,rare,1.00,JP,2023-05-01,PMEI,3,NM,0,,5.00,4.00,3.00,0,113,224,335
3,2,Opt,Ixalan,common,0.10,EN,2023-05-01,XLN,65,NM,0,,0.10,0.10,0.05,0.30,114,225,336
";

fn echo_table() -> Table {
    read_csv(ECHO_EXPORT.as_bytes()).unwrap()
}

mod coercion_tests {
    use super::*;

    #[test]
    fn foil_one_and_zero() {
        assert_eq!(coerce_foil("1"), "foil");
        assert_eq!(coerce_foil("0"), "");
        assert_eq!(coerce_foil("1.0"), "foil");
    }

    #[test]
    fn foil_other_values_pass_through() {
        assert_eq!(coerce_foil("2"), "2");
        assert_eq!(coerce_foil("yes"), "yes");
        assert_eq!(coerce_foil(""), "");
        assert_eq!(coerce_foil("foil"), "foil");
    }

    #[test]
    fn count_zero_becomes_one() {
        assert_eq!(coerce_count("0"), "1");
        assert_eq!(coerce_count("0.0"), "1");
        assert_eq!(coerce_count("3"), "3");
        assert_eq!(coerce_count("many"), "many");
        assert_eq!(coerce_count(""), "");
    }
}

mod column_stage_tests {
    use super::*;

    #[test]
    fn drops_and_renames_echo_columns() {
        let result = transform(&echo_table(), &RuleTables::default()).unwrap();
        assert_eq!(
            result.table().headers(),
            [
                "Count",
                "Foil",
                "Name",
                "Purchased Price",
                "Language",
                "Edition",
                "Collector Number",
                "Condition"
            ]
        );
    }

    #[test]
    fn passthrough_columns_are_kept() {
        let table = read_csv("Name,Set Code,Tags\nOpt,XLN,cube\n".as_bytes()).unwrap();
        let result = transform(&table, &RuleTables::default()).unwrap();
        assert_eq!(result.table().headers(), ["Name", "Edition", "Tags"]);
        assert_eq!(result.table().get(0, "Tags"), Some("cube"));
    }

    #[test]
    fn coerces_foil_and_count_cells() {
        let result = transform(&echo_table(), &RuleTables::default()).unwrap();
        let table = result.table();

        let foil: Vec<&str> = table.column("Foil").unwrap().collect();
        assert_eq!(foil, ["", "foil", "", "2"]);

        let count: Vec<&str> = table.column("Count").unwrap().collect();
        assert_eq!(count, ["1", "1", "2", "3"]);
    }

    #[test]
    fn missing_name_is_fatal() {
        let table = read_csv("Set Code,Reg Qty\nM11,1\n".as_bytes()).unwrap();
        let err = transform(&table, &RuleTables::default()).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredColumn(ref c) if c == "Name"));
    }

    #[test]
    fn missing_edition_is_fatal() {
        let table = read_csv("Name,Reg Qty\nOpt,1\n".as_bytes()).unwrap();
        let err = transform(&table, &RuleTables::default()).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredColumn(ref c) if c == "Edition"));
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let table = read_csv("Name,Set Code\nOpt,XLN\n".as_bytes()).unwrap();
        let result = transform(&table, &RuleTables::default()).unwrap();
        assert_eq!(result.table().len(), 1);
        assert_eq!(result.total_changes(), 0);
    }

    #[test]
    fn dropped_name_column_is_missing() {
        let mut rules = RuleTables::default();
        rules.columns_to_drop.insert("Name".to_string());

        let table = read_csv("Name,Set Code\nOpt,XLN\n".as_bytes()).unwrap();
        let err = transform(&table, &rules).unwrap_err();
        assert!(matches!(err, Error::MissingRequiredColumn(_)));
    }
}

mod correction_tests {
    use super::*;

    #[test]
    fn writes_corrections_back_into_rows() {
        let result = transform(&echo_table(), &RuleTables::default()).unwrap();
        let table = result.table();

        let names: Vec<&str> = table.column("Name").unwrap().collect();
        assert_eq!(names, ["Lightning Bolt", "Scroll Rack", "Arena", "Opt"]);

        let editions: Vec<&str> = table.column("Edition").unwrap().collect();
        assert_eq!(editions, ["M11", "WC98", "PHPR", "XLN"]);
    }

    #[test]
    fn change_log_holds_only_changed_rows_in_order() {
        let result = transform(&echo_table(), &RuleTables::default()).unwrap();

        assert_eq!(result.total_changes(), 2);
        assert_eq!(
            result.changes()[0],
            ChangeRecord {
                original_name: "Scroll Rack - 1998 Brian Selden".to_string(),
                original_edition: "PLIST".to_string(),
                new_name: "Scroll Rack".to_string(),
                new_edition: "WC98".to_string(),
            }
        );
        assert_eq!(
            result.changes()[1],
            ChangeRecord {
                original_name: "Arena (Promo) - JP Full Art".to_string(),
                original_edition: "PMEI".to_string(),
                new_name: "Arena".to_string(),
                new_edition: "PHPR".to_string(),
            }
        );
    }

    #[test]
    fn padded_name_is_logged_as_change() {
        let csv = "Name,Set Code,note\n\"Opt \",XLN,\nOpt,XLN,\n";
        let table = read_csv(csv.as_bytes()).unwrap();
        let result = transform(&table, &RuleTables::default()).unwrap();

        assert_eq!(result.total_changes(), 1);
        assert_eq!(result.changes()[0].original_name, "Opt ");
        assert_eq!(result.changes()[0].new_name, "Opt");
        assert_eq!(result.table().get(0, "Name"), Some("Opt"));
    }

    #[test]
    fn second_pass_is_idempotent() {
        let rules = RuleTables::default();
        let first = transform(&echo_table(), &rules).unwrap();
        let second = transform(first.table(), &rules).unwrap();

        assert_eq!(second.total_changes(), 0);
        assert_eq!(second.table(), first.table());
    }

    #[test]
    fn input_table_is_not_modified() {
        let table = echo_table();
        let before = table.clone();
        let _ = transform(&table, &RuleTables::default()).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn empty_table_yields_empty_result() {
        let table = read_csv("Name,Set Code\n".as_bytes()).unwrap();
        let result = transform(&table, &RuleTables::default()).unwrap();
        assert!(result.table().is_empty());
        assert!(result.changes().is_empty());
        assert_eq!(result.into_table().headers(), ["Name", "Edition"]);
    }
}
