//! Fixed wording printed on the form

use intake_types::Gender;

pub const TITLE: &str = "富足診所 初診基本資料表";

pub const SECTION_BASIC: &str = "【基本資料】";
pub const SECTION_FAMILY: &str = "【家族病史】";
pub const SECTION_SIGNATURE: &str = "【病人簽名】";

pub const FAMILY_PROMPT: &str = "請問您的直系血親中，是否曾罹患以下疾病？";

/// Shown when the clinic has not assigned a record number yet
pub const CLINIC_FILLS_IN: &str = "（由診所填寫）";
pub const NONE: &str = "無";
pub const CHECKED: &str = "☑";
pub const LIST_DELIMITER: &str = "、";

pub const SIGNATURE_LOAD_FAILED: &str = "（簽名圖片載入失敗）";
pub const UNSIGNED: &str = "（未簽名）";

/// Field labels, in the order they appear on the page
pub mod label {
    pub const MEDICAL_RECORD_NUMBER: &str = "病歷號碼";
    pub const FILL_DATE: &str = "填表日期";
    pub const NAME: &str = "姓名";
    pub const GENDER: &str = "性別";
    pub const BIRTH_DATE: &str = "出生日期";
    pub const ID_NUMBER: &str = "身分證字號";
    pub const HOME_PHONE: &str = "聯絡電話（宅）";
    pub const MOBILE_PHONE: &str = "手機";
    pub const ADDRESS: &str = "聯絡地址";
    pub const EMERGENCY_CONTACT: &str = "緊急聯絡人";
    pub const RELATIONSHIP: &str = "與病患關係";
    pub const EMERGENCY_PHONE: &str = "緊急聯絡電話";
    pub const EMAIL: &str = "電子信箱";
    pub const SOURCE_CHANNELS: &str = "得知本院訊息";
    pub const REFERRER: &str = "介紹人姓名";
    pub const FAMILY_HISTORY_OTHER: &str = "其他說明";
}

/// `label：value`, the way single fields are printed
pub fn field(label: &str, value: &str) -> String {
    format!("{label}：{value}")
}

pub fn birth_line(year: &str, month: &str, day: &str) -> String {
    format!("民國 {year} 年 {month} 月 {day} 日")
}

pub fn checked(label: &str) -> String {
    format!("{CHECKED} {label}")
}

pub fn gender(gender: Option<Gender>) -> &'static str {
    gender.map(|g| g.glyph()).unwrap_or("")
}

/// `value`, or `fallback` when it is empty
pub fn or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
