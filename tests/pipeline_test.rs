//! CSV から言語別 JSON までの変換全体に関するテスト

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::path::{
    Path,
    PathBuf,
};

use googletest::prelude::*;
use i18n_csv2json::config::{
    ProjectSettings,
    ScoringConfig,
};
use i18n_csv2json::report::LanguageStatus;
use i18n_csv2json::{
    Csv2JsonError,
    RunOptions,
    run,
};
use pretty_assertions::assert_eq;
use serde_json::{
    Value,
    json,
};
use tempfile::TempDir;

const MULTI_LANGUAGE_CSV: &str = "\
中文,英语,土耳其,印度尼西亚,阿拉伯
{{num}}金币,{{num}} Coins,{{num}} Coins,{{num}} Koin,{{num}} عملات
奖励,Reward,Ödül,Hadiah,المكافأة
{{num}}倍收益，{{goldNum}}金币,\"{{num}}x earnings, {{goldNum}} coins\",\"{{num}}x kazanç, {{goldNum}} coins\",\"{{num}}x penghasilan, {{goldNum}} koin\",أرباح {{num}}x، {{goldNum}} عملات
{{num}}人,{{num}} People,{{num}} Kişi,{{num}} orang,{{num}} أشخاص
获胜排行,Winning Rank,Kazanan Sıralama,Pemenang peringkat,الترتيب الفائز";

fn multi_language_template() -> Value {
    json!({
        "price": "{{num}}金币",
        "reward": "奖励",
        "earnings": "{{num}}倍收益，{{goldNum}}金币",
        "winningRank": "获胜排行",
        "common": {
            "people": "{{num}}人"
        }
    })
}

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(csv: &str, template: &Value) -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("table.csv"), csv).unwrap();
        std::fs::write(dir.path().join("zh.json"), serde_json::to_string_pretty(template).unwrap())
            .unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn options(&self, lang_codes: &[&str]) -> RunOptions {
        RunOptions {
            csv_path: self.path("table.csv"),
            template_path: self.path("zh.json"),
            output_dir: self.dir.path().to_path_buf(),
            group_key: None,
            trim: false,
            lang_codes: lang_codes.iter().map(|code| (*code).to_string()).collect(),
            use_template_as_default: false,
            scoring: ScoringConfig::default(),
        }
    }

    fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path(name), content).unwrap();
    }

    fn read_json(&self, name: &str) -> Value {
        read_json(&self.path(name))
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
async fn test_writes_every_target_language() {
    let fixture = Fixture::new(MULTI_LANGUAGE_CSV, &multi_language_template());

    let report = run(&fixture.options(&["zh", "en", "tr", "id", "ar"])).await.unwrap();

    assert_that!(report.record_count, eq(5));
    assert_eq!(
        fixture.read_json("en.json"),
        json!({
            "price": "{{num}} Coins",
            "reward": "Reward",
            "earnings": "{{num}}x earnings, {{goldNum}} coins",
            "winningRank": "Winning Rank",
            "common": {"people": "{{num}} People"}
        })
    );
    assert_eq!(
        fixture.read_json("tr.json"),
        json!({
            "price": "{{num}} Coins",
            "reward": "Ödül",
            "earnings": "{{num}}x kazanç, {{goldNum}} coins",
            "winningRank": "Kazanan Sıralama",
            "common": {"people": "{{num}} Kişi"}
        })
    );
    assert_eq!(
        fixture.read_json("ar.json"),
        json!({
            "price": "{{num}} عملات",
            "reward": "المكافأة",
            "earnings": "أرباح {{num}}x، {{goldNum}} عملات",
            "winningRank": "الترتيب الفائز",
            "common": {"people": "{{num}} أشخاص"}
        })
    );
    assert_eq!(fixture.read_json("id.json")["reward"], json!("Hadiah"));
}

#[tokio::test]
async fn test_template_is_never_overwritten() {
    let fixture = Fixture::new(MULTI_LANGUAGE_CSV, &multi_language_template());
    let before = std::fs::read_to_string(fixture.path("zh.json")).unwrap();

    let report = run(&fixture.options(&["zh", "en"])).await.unwrap();

    let zh = report.languages.first().unwrap();
    assert_eq!(zh.status, LanguageStatus::SkippedSelfOverwrite);
    assert_eq!(std::fs::read_to_string(fixture.path("zh.json")).unwrap(), before);
    assert_eq!(report.summary.processed_languages, ["en"]);
}

#[tokio::test]
async fn test_source_language_written_when_template_lives_elsewhere() {
    let fixture = Fixture::new(MULTI_LANGUAGE_CSV, &multi_language_template());
    let mut options = fixture.options(&["zh", "en"]);
    options.output_dir = fixture.path("out");

    let report = run(&options).await.unwrap();

    assert_that!(report.summary.totals.languages_written_count, eq(2));
    assert_eq!(read_json(&fixture.path("out/zh.json")), multi_language_template());
}

#[tokio::test]
async fn test_basic_update_counts() {
    let fixture = Fixture::new("zh,en\n奖励,Reward\n价格,Price\n", &json!({"a": "奖励", "b": "价格"}));

    let report = run(&fixture.options(&["zh", "en"])).await.unwrap();

    let en = report.languages.get(1).unwrap();
    assert_eq!(en.status, LanguageStatus::Written);
    assert_that!(en.stats.updated, eq(2));
    assert_that!(en.stats.unchanged, eq(0));
    assert_eq!(fixture.read_json("en.json"), json!({"a": "Reward", "b": "Price"}));
}

#[tokio::test]
async fn test_untranslated_leaf_becomes_empty() {
    let fixture = Fixture::new("zh,en\n奖励,Reward\n", &json!({"a": "奖励", "b": "价格"}));

    let report = run(&fixture.options(&["zh", "en"])).await.unwrap();

    assert_eq!(fixture.read_json("en.json"), json!({"a": "Reward", "b": ""}));
    let missing = &report.languages.get(1).unwrap().stats.missing;
    assert_that!(missing.len(), eq(1));
    assert_that!(missing.first().unwrap().path.to_string(), eq("b"));
    assert_that!(report.summary.totals.missing, eq(1));
}

#[tokio::test]
async fn test_untranslated_leaf_keeps_template_text_on_request() {
    let fixture = Fixture::new("zh,en\n奖励,Reward\n", &json!({"a": "奖励", "b": "价格"}));
    let mut options = fixture.options(&["zh", "en"]);
    options.use_template_as_default = true;

    run(&options).await.unwrap();

    assert_eq!(fixture.read_json("en.json"), json!({"a": "Reward", "b": "价格"}));
}

#[tokio::test]
async fn test_untranslated_leaf_keeps_existing_translation() {
    let fixture = Fixture::new("zh,en\n奖励,Reward\n", &json!({"a": "奖励", "b": "价格"}));
    fixture.write("en.json", r#"{"b": "Price (manual)", "stale": "gone"}"#);

    run(&fixture.options(&["zh", "en"])).await.unwrap();

    assert_eq!(fixture.read_json("en.json"), json!({"a": "Reward", "b": "Price (manual)"}));
}

#[tokio::test]
async fn test_group_key_limits_output() {
    let fixture = Fixture::new(MULTI_LANGUAGE_CSV, &multi_language_template());
    let mut options = fixture.options(&["zh", "en", "tr"]);
    options.group_key = Some("common".to_string());

    run(&options).await.unwrap();

    assert_eq!(fixture.read_json("en.json"), json!({"common": {"people": "{{num}} People"}}));
    assert_eq!(fixture.read_json("tr.json"), json!({"common": {"people": "{{num}} Kişi"}}));
}

#[tokio::test]
async fn test_unknown_group_key_aborts() {
    let fixture = Fixture::new(MULTI_LANGUAGE_CSV, &multi_language_template());
    let mut options = fixture.options(&["zh", "en"]);
    options.group_key = Some("nope".to_string());

    let result = run(&options).await;

    assert!(matches!(result, Err(Csv2JsonError::Configuration(_))));
    assert!(!fixture.path("en.json").exists());
}

#[tokio::test]
async fn test_duplicate_source_on_adjacent_rows_follows_edge_and_order() {
    let csv = "zh,en\n标题,Title\n确定,OK\n确定,Confirm\n返回,Back\n";
    let template = json!({
        "dialog": {"title": "标题", "ok": "确定"},
        "footer": {"confirm": "确定", "back": "返回"}
    });
    let fixture = Fixture::new(csv, &template);

    run(&fixture.options(&["zh", "en"])).await.unwrap();

    assert_eq!(
        fixture.read_json("en.json"),
        json!({
            "dialog": {"title": "Title", "ok": "OK"},
            "footer": {"confirm": "Confirm", "back": "Back"}
        })
    );
}

#[tokio::test]
async fn test_duplicate_source_picks_row_with_matching_neighbours() {
    // 「确定」の候補は周辺行が異なる: OK は 标题/取消/说明、Confirm は 说明/删除/返回
    let csv = "zh,en\n标题,Title\n确定,OK\n取消,Cancel\n说明,Note\n删除,Delete\n确定,Confirm\n返回,Back\n";
    let template = json!({
        "danger": {"title": "删除", "ok": "确定", "back": "返回"},
        "dialog": {"title": "标题", "ok": "确定", "cancel": "取消"}
    });
    let fixture = Fixture::new(csv, &template);

    run(&fixture.options(&["zh", "en"])).await.unwrap();

    assert_eq!(
        fixture.read_json("en.json"),
        json!({
            "danger": {"title": "Delete", "ok": "Confirm", "back": "Back"},
            "dialog": {"title": "Title", "ok": "OK", "cancel": "Cancel"}
        })
    );
}

#[tokio::test]
async fn test_reordered_language_file_is_rewritten_in_template_order() {
    let fixture =
        Fixture::new("zh,en\n奖励,Reward\n价格,Price\n", &json!({"a": "奖励", "b": "价格"}));
    fixture.write("en.json", r#"{"b": "Price", "a": "Reward"}"#);

    let report = run(&fixture.options(&["zh", "en"])).await.unwrap();

    let en = report.languages.get(1).unwrap();
    assert_eq!(en.status, LanguageStatus::Written);
    assert_that!(en.stats.updated, eq(0));
    assert_that!(en.stats.unchanged, eq(2));
    assert_eq!(
        std::fs::read_to_string(fixture.path("en.json")).unwrap(),
        "{\n  \"a\": \"Reward\",\n  \"b\": \"Price\"\n}"
    );
}

#[tokio::test]
async fn test_dropped_key_is_written_without_updated_leaves() {
    let fixture = Fixture::new("zh,en\n奖励,Reward\n", &json!({"a": "奖励"}));
    fixture.write("en.json", r#"{"a": "Reward", "stale": "gone"}"#);

    let report = run(&fixture.options(&["zh", "en"])).await.unwrap();

    let en = report.languages.get(1).unwrap();
    assert_eq!(en.status, LanguageStatus::Written);
    assert_that!(en.stats.updated, eq(0));
    assert_that!(report.summary.totals.languages_written_count, eq(1));
    assert_eq!(fixture.read_json("en.json"), json!({"a": "Reward"}));
}

#[tokio::test]
async fn test_failed_write_does_not_stop_later_languages() {
    let fixture = Fixture::new(MULTI_LANGUAGE_CSV, &multi_language_template());
    std::fs::create_dir(fixture.path("en.json")).unwrap();

    let report = run(&fixture.options(&["zh", "en", "tr"])).await.unwrap();

    let statuses: Vec<&LanguageStatus> = report.languages.iter().map(|l| &l.status).collect();
    assert_eq!(statuses.first(), Some(&&LanguageStatus::SkippedSelfOverwrite));
    assert!(matches!(statuses.get(1), Some(LanguageStatus::Failed(_))));
    assert_eq!(statuses.get(2), Some(&&LanguageStatus::Written));
    assert_eq!(fixture.read_json("tr.json")["reward"], json!("Ödül"));
    assert_that!(report.summary.totals.languages_written_count, eq(1));
    assert_eq!(report.summary.processed_languages, ["en", "tr"]);
}

#[tokio::test]
async fn test_second_run_changes_nothing() {
    let fixture = Fixture::new(MULTI_LANGUAGE_CSV, &multi_language_template());
    let options = fixture.options(&["zh", "en", "tr"]);
    run(&options).await.unwrap();
    let first = std::fs::read_to_string(fixture.path("en.json")).unwrap();

    let report = run(&options).await.unwrap();

    assert_eq!(std::fs::read_to_string(fixture.path("en.json")).unwrap(), first);
    assert_that!(report.summary.totals.languages_written_count, eq(0));
    assert_that!(report.summary.totals.updated, eq(0));
    assert_that!(report.summary.totals.unchanged, eq(10));
    assert!(report.languages.iter().skip(1).all(|l| l.status == LanguageStatus::Unchanged));
}

#[tokio::test]
async fn test_unparseable_language_file_is_replaced() {
    let fixture = Fixture::new("zh,en\n奖励,Reward\n", &json!({"a": "奖励"}));
    fixture.write("en.json", "{ not json");

    let report = run(&fixture.options(&["zh", "en"])).await.unwrap();

    assert_eq!(report.languages.get(1).unwrap().status, LanguageStatus::Written);
    assert_eq!(fixture.read_json("en.json"), json!({"a": "Reward"}));
}

#[tokio::test]
async fn test_header_only_csv_is_rejected() {
    let fixture = Fixture::new("zh,en\n", &json!({"a": "奖励"}));

    let result = run(&fixture.options(&["zh", "en"])).await;

    assert!(matches!(result, Err(Csv2JsonError::MalformedInput { .. })));
}

#[tokio::test]
async fn test_missing_template_is_reported() {
    let fixture = Fixture::new("zh,en\n奖励,Reward\n", &json!({"a": "奖励"}));
    let mut options = fixture.options(&["zh", "en"]);
    options.template_path = fixture.path("absent.json");

    let result = run(&options).await;

    assert!(matches!(result, Err(Csv2JsonError::InputNotFound { .. })));
}

#[tokio::test]
async fn test_trim_option_matches_padded_cells() {
    let fixture = Fixture::new("zh,en\n 奖励 , Reward \n", &json!({"a": "奖励"}));
    let mut options = fixture.options(&["zh", "en"]);
    options.trim = true;

    run(&options).await.unwrap();

    assert_eq!(fixture.read_json("en.json"), json!({"a": "Reward"}));
}

#[tokio::test]
async fn test_options_from_settings() {
    let fixture = Fixture::new("zh,en\n奖励,Reward\n", &json!({"a": "奖励"}));
    let settings = ProjectSettings {
        template: fixture.path("zh.json"),
        output_dir: fixture.path("locales"),
        ..ProjectSettings::default()
    };

    let report = run(&RunOptions::from_settings(&settings, fixture.path("table.csv"))).await.unwrap();

    assert_eq!(report.summary.processed_languages, ["zh", "en"]);
    assert_eq!(read_json(&fixture.path("locales/en.json")), json!({"a": "Reward"}));
}
