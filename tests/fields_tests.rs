//! Field and field collection tests

use ish_metadata_sdk::{
    FieldError, FilterOperator, IshField, IshFields, Level, ValueAction, ValueType,
};

fn value_field(name: &str, level: Level, value: Option<&str>) -> IshField {
    IshField::metadata(name, level, ValueType::Value, value)
}

mod field_xml_tests {
    use super::*;

    #[test]
    fn test_parse_collection_in_document_order() {
        let xml = r#"<ishfields>
  <ishfield name="FTITLE" level="logical">Some Value</ishfield>
  <ishfield name="FSTATUS" level="lng" ishvaluetype="element">VSTATUSDRAFT</ishfield>
  <ishfield name="FAUTHOR" level="lng" ishvaluetype="value" ishoperator="like">adm%</ishfield>
</ishfields>"#;
        let fields = IshFields::from_xml(xml).unwrap();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.fields()[0].key(), ("FTITLE", Level::Logical, ValueType::Value));
        assert_eq!(fields.fields()[0].value(), Some("Some Value"));
        assert_eq!(fields.fields()[1].value_type(), ValueType::Element);
        assert!(fields.fields()[2].is_filter());
        assert_eq!(fields.fields()[2].operator(), Some(FilterOperator::Like));
    }

    #[test]
    fn test_collection_round_trip() {
        let mut fields = IshFields::new();
        fields
            .add_field(value_field("FTITLE", Level::Logical, Some("Doc & \"1\"")))
            .add_field(value_field("VERSION", Level::Version, Some("2")))
            .add_field(value_field("FDESCRIPTION", Level::Logical, None));

        let parsed = IshFields::from_xml(&fields.to_xml()).unwrap();
        assert_eq!(parsed, fields);
    }

    #[test]
    fn test_requested_parse_ignores_text() {
        let xml = r#"<ishfields>
  <ishfield name="FTITLE" level="logical">ignored</ishfield>
</ishfields>"#;
        let requested = IshFields::requested_from_xml(xml).unwrap();

        assert_eq!(requested.len(), 1);
        assert!(requested.fields()[0].is_requested());
        assert_eq!(requested.fields()[0].value(), None);
        assert_eq!(
            requested.to_xml(),
            r#"<ishfields><ishfield name="FTITLE" level="logical"/></ishfields>"#
        );
    }

    #[test]
    fn test_missing_name_is_malformed() {
        let result =
            IshFields::from_xml(r#"<ishfields><ishfield level="lng">x</ishfield></ishfields>"#);
        assert!(matches!(result, Err(FieldError::MalformedField(_))));
    }

    #[test]
    fn test_unknown_operator_is_malformed() {
        let result = IshField::from_xml(
            r#"<ishfield name="FTITLE" level="logical" ishoperator="roughly">x</ishfield>"#,
        );
        assert!(matches!(result, Err(FieldError::MalformedField(_))));
    }

    #[test]
    fn test_direct_token_parse_reports_unknown_value() {
        let result = "chapter".parse::<Level>();
        assert!(matches!(
            result,
            Err(FieldError::UnknownEnumValue { kind: "level", .. })
        ));
    }
}

mod collection_tests {
    use super::*;

    fn status(value_type: ValueType, value: &str) -> IshField {
        IshField::metadata("FSTATUS", Level::Lng, value_type, Some(value))
    }

    #[test]
    fn test_identity_key_is_unique_after_updates() {
        let mut fields = IshFields::new();
        for value in ["a", "b", "c"] {
            fields.add_or_update_field(status(ValueType::Value, value));
            fields.add_or_update_field(status(ValueType::Element, value));
        }

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get_field_value("FSTATUS", Level::Lng, ValueType::Value), "c");
        assert_eq!(fields.get_field_value("FSTATUS", Level::Lng, ValueType::Element), "c");
    }

    #[test]
    fn test_merge_keeps_left_order_and_right_values() {
        let mut left = IshFields::new();
        left.add_field(status(ValueType::Value, "Draft"))
            .add_field(value_field("FTITLE", Level::Logical, Some("Old")));

        let mut right = IshFields::new();
        right
            .add_field(value_field("FTITLE", Level::Logical, Some("New")))
            .add_field(value_field("VERSION", Level::Version, Some("1")));

        left.merge(&right);
        let names: Vec<&str> = left.iter().map(IshField::name).collect();
        assert_eq!(names, vec!["FSTATUS", "FTITLE", "VERSION"]);
        assert_eq!(left.get_field_value("FTITLE", Level::Logical, ValueType::Value), "New");
    }

    #[test]
    fn test_join_field_prepend() {
        let mut fields = IshFields::new();
        fields
            .join_field(value_field("DESC", Level::None, Some("Hello")), ValueAction::Prepend)
            .join_field(value_field("DESC", Level::None, Some(" World")), ValueAction::Prepend);

        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields.get_field_value("DESC", Level::None, ValueType::Value),
            " WorldHello"
        );
    }

    #[test]
    fn test_retrieve_all_value_types() {
        let mut fields = IshFields::new();
        fields
            .add_field(status(ValueType::Value, "Draft"))
            .add_field(status(ValueType::Element, "VSTATUSDRAFT"))
            .add_field(value_field("FTITLE", Level::Logical, Some("Doc1")));

        assert_eq!(fields.retrieve("FSTATUS", Level::Lng, ValueType::All).len(), 2);
        assert_eq!(fields.retrieve("FSTATUS", Level::Lng, ValueType::Id).len(), 0);
        assert_eq!(fields.retrieve_by_level(Level::Logical).len(), 1);

        let first = fields.retrieve_first("FSTATUS", Level::Lng, ValueType::All).unwrap();
        assert_eq!(first.value(), Some("Draft"));
    }

    #[test]
    fn test_to_filter_fields_defaults_operator() {
        let mut fields = IshFields::new();
        fields
            .add_field(status(ValueType::Value, "Draft"))
            .add_field(IshField::filter(
                "FTITLE",
                Level::Logical,
                ValueType::Value,
                Some("Doc%"),
                FilterOperator::Like,
            ));

        let filters = fields.to_filter_fields(FilterOperator::Equal);
        assert!(filters.iter().all(IshField::is_filter));
        assert_eq!(filters.fields()[0].operator(), Some(FilterOperator::Equal));
        assert_eq!(filters.fields()[1].operator(), Some(FilterOperator::Like));
        assert_eq!(filters.fields()[0].value(), Some("Draft"));
    }

    #[test]
    fn test_collect_and_iterate() {
        let fields: IshFields = ["A", "B"]
            .into_iter()
            .map(|name| IshField::requested(name, Level::None, ValueType::Value))
            .collect();

        let mut names = Vec::new();
        for field in &fields {
            names.push(field.name().to_string());
        }
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(fields.into_iter().count(), 2);
    }
}
