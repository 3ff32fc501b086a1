use pgi_index::inputs::ScoreSheetImporter;
use pgi_index::{rank_reports, Catalogue, EntityReport, InputError, Level, ScoringEngine};

const EXPORT: &str = "level,entity_id,indicator_key,achieved_value,recorded_at\n\
district,pune,lo_math_class3,58,2025-05-01\n\
district,pune,lo_math_class3,66,2025-06-01\n\
district,pune,eq_gender_lang_class3,4.5,\n\
district,nashik,lo_math_class3,80,2025-06-01T08:30:00Z\n\
district,nashik,lo_music_class3,99,\n\
block,haveli,lo_math_class3,95,\n\
district,aurangabad,lo_math_class3,40,\n";

#[test]
fn import_groups_rows_by_entity_in_first_seen_order() {
    let sheets = ScoreSheetImporter::from_reader(Catalogue::standard(), EXPORT.as_bytes())
        .expect("export imports");

    let entities: Vec<String> = sheets
        .iter()
        .map(|sheet| sheet.entity().entity_id.clone())
        .collect();
    assert_eq!(entities, vec!["pune", "nashik", "haveli", "aurangabad"]);

    let pune = &sheets[0];
    assert_eq!(pune.len(), 2);
    assert_eq!(pune.achieved_values()["lo_math_class3"], 66.0);

    let nashik = &sheets[1];
    assert_eq!(nashik.len(), 1, "unknown indicator rows are skipped");
}

#[test]
fn reports_and_ranking_from_an_export() {
    let engine = ScoringEngine::standard();
    let sheets =
        ScoreSheetImporter::from_reader(engine.catalogue(), EXPORT.as_bytes()).expect("imports");
    let reports: Vec<EntityReport> = sheets
        .iter()
        .map(|sheet| EntityReport::build(&engine, sheet))
        .collect();

    let pune = &reports[0];
    assert_eq!(pune.level, Level::District);
    assert_eq!(pune.total_score, engine.score(&sheets[0].achieved_values()).total_score);
    let equity_gap = pune
        .domains
        .iter()
        .flat_map(|domain| domain.indicators.iter())
        .find(|indicator| indicator.indicator_key == "eq_gender_lang_class3")
        .expect("district-level equity indicator listed");
    assert_eq!(equity_gap.achieved_value, Some(4.5));
    assert_eq!(equity_gap.achievement_percentage, 50.0);
    assert_eq!(equity_gap.gap_to_target, Some(1.5));

    let ranked = rank_reports(&reports, Level::District, 2);
    let ids: Vec<&str> = ranked.iter().map(|entry| entry.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["nashik", "pune"]);
    assert_eq!(ranked[1].rank, 2);
}

#[test]
fn unknown_level_fails_the_import() {
    let export = "level,entity_id,indicator_key,achieved_value\ncluster,c1,lo_math_class3,50\n";
    let result = ScoreSheetImporter::from_reader(Catalogue::standard(), export.as_bytes());
    assert!(matches!(result, Err(InputError::UnknownLevel(_))));
}
