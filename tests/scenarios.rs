// End-to-end scenarios over the public API

use cnj_triage::{
    assign_owner, classify, extract_check_digit, extract_year, format_number, process_batch,
    read_csv_str, write_csv_string, BatchSummary, ClassifierConfig, NumberFormat,
    OwnerRoutingTable,
};

fn abel_carlos() -> OwnerRoutingTable {
    serde_json::from_str(r#"{"ABEL":[[1,19]], "CARLOS":[[20,39]]}"#).unwrap()
}

#[test]
fn canonical_number_digit_and_year() {
    assert_eq!(extract_check_digit("0000046-15.2017.8.05.0216"), 15);
    assert_eq!(extract_year("0000046-15.2017.8.05.0216"), Some(2017));
}

#[test]
fn tribunal_merged_number_digit_and_year() {
    assert_eq!(extract_check_digit("0000046-15.2017.805.0216"), 15);
    assert_eq!(extract_year("0000046-15.2017.805.0216"), Some(2017));
}

#[test]
fn unformatted_number_digit_and_year() {
    assert_eq!(extract_check_digit("00000461520178050216"), 15);
    assert_eq!(extract_year("00000461520178050216"), Some(2017));
}

#[test]
fn owner_assignment_from_json_table() {
    let table = abel_carlos();
    assert_eq!(assign_owner(Some(15), &table).label(), "ABEL");
    assert_eq!(assign_owner(Some(25), &table).label(), "CARLOS");
    assert_eq!(
        assign_owner(Some(50), &table).label(),
        "no owner configured for digit 50"
    );
    assert_eq!(assign_owner(Some(0), &table).label(), "digit not identified");
}

#[test]
fn meta2_classification_labels() {
    assert_eq!(classify(Some(2017), 2021).label(), "Meta 2");
    assert_eq!(classify(Some(2021), 2021).label(), "outside Meta 2");
    assert_eq!(classify(None, 2021).label(), "year not identified");
}

#[test]
fn unformatted_to_canonical() {
    assert_eq!(
        format_number("00000461520178050216", NumberFormat::Canonical),
        "0000046-15.2017.8.05.0216"
    );
}

#[test]
fn csv_in_csv_out() {
    let config = ClassifierConfig::from_json(
        r#"{
            "routingTable": {"ABEL": [[1, 19]], "CARLOS": [[20, 39]]},
            "processNumberColumn": "numeroProcesso",
            "metaCutoffYear": 2021
        }"#,
    )
    .unwrap();

    let input = "\
numeroProcesso;assuntoPrincipal
0000046-15.2017.8.05.0216;Alimentos
0000047-25.2022.805.0216;Divórcio
00000486020198050216;Guarda
;Sem número
";
    let mut batch = read_csv_str(input).unwrap();
    let results = process_batch(&mut batch, &config, NumberFormat::TribunalMerged).unwrap();
    let summary = BatchSummary::from_classifications(&results);

    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.meta2_count, 2);
    assert_eq!(summary.unassigned_count, 2);

    let output = write_csv_string(&batch, b';').unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines[0],
        "numeroProcesso;assuntoPrincipal;checkDigit;year;owner;meta2Classification;formattedNumber"
    );
    assert_eq!(
        lines[1],
        "0000046-15.2017.8.05.0216;Alimentos;15;2017;ABEL;Meta 2;0000046-15.2017.805.0216"
    );
    assert_eq!(
        lines[2],
        "0000047-25.2022.805.0216;Divórcio;25;2022;CARLOS;outside Meta 2;0000047-25.2022.805.0216"
    );
    assert_eq!(
        lines[3],
        "00000486020198050216;Guarda;60;2019;no owner configured for digit 60;Meta 2;0000048-60.2019.805.0216"
    );
    assert_eq!(
        lines[4],
        ";Sem número;0;;digit not identified;year not identified;"
    );
}

#[test]
fn missing_column_names_the_column() {
    let config = ClassifierConfig::default();
    let mut batch = read_csv_str("processo;outra\n1;2\n").unwrap();
    let err = process_batch(&mut batch, &config, NumberFormat::Canonical).unwrap_err();
    assert!(err.to_string().contains("Column not found: 'numeroProcesso'"));
}
