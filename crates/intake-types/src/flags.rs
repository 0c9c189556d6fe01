//! Fixed-size boolean flag groups
//!
//! Each group is a closed enumeration backed by one table of
//! `{flag -> form tag -> display label}`. Flattening a multi-select and
//! listing the checked labels both walk that table, so adding a flag only
//! touches the table and the struct.

use serde::{Deserialize, Serialize};

/// One row of a flag group's lookup table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec<F: 'static> {
    /// The flag this row describes
    pub flag: F,
    /// Value the form submits when the checkbox is ticked
    pub tag: &'static str,
    /// Text shown on the rendered document
    pub label: &'static str,
}

/// A record of independent booleans over a closed enumeration
pub trait FlagGroup: Default {
    type Flag: Copy + Eq + 'static;

    /// Lookup table in display order
    const SPECS: &'static [FlagSpec<Self::Flag>];

    fn get(&self, flag: Self::Flag) -> bool;

    fn set(&mut self, flag: Self::Flag, value: bool);

    /// Build the group from the tags selected in a repeated form field.
    ///
    /// Tags not present in the table are ignored.
    fn from_tags<S: AsRef<str>>(selected: &[S]) -> Self {
        let mut group = Self::default();
        for spec in Self::SPECS {
            let ticked = selected.iter().any(|tag| tag.as_ref() == spec.tag);
            group.set(spec.flag, ticked);
        }
        group
    }

    /// Labels of the flags that are set, in table order
    fn checked_labels(&self) -> Vec<&'static str> {
        Self::SPECS
            .iter()
            .filter(|spec| self.get(spec.flag))
            .map(|spec| spec.label)
            .collect()
    }

    /// True if at least one flag is set
    fn any(&self) -> bool {
        Self::SPECS.iter().any(|spec| self.get(spec.flag))
    }
}

/// Where the patient heard about the clinic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Facebook,
    Instagram,
    Website,
    FriendReferral,
    Google,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceChannels {
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub facebook: bool,
    /// Older form revisions submitted this slot as `line`
    #[serde(alias = "line", deserialize_with = "crate::lenient::flag")]
    pub ig: bool,
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub website: bool,
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub friend_refer: bool,
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub google: bool,
}

impl FlagGroup for SourceChannels {
    type Flag = Channel;

    const SPECS: &'static [FlagSpec<Channel>] = &[
        FlagSpec {
            flag: Channel::Facebook,
            tag: "FB",
            label: "Facebook",
        },
        FlagSpec {
            flag: Channel::Instagram,
            tag: "IG",
            label: "IG",
        },
        FlagSpec {
            flag: Channel::Website,
            tag: "診所網站",
            label: "診所網站",
        },
        FlagSpec {
            flag: Channel::FriendReferral,
            tag: "親友介紹",
            label: "親友介紹",
        },
        FlagSpec {
            flag: Channel::Google,
            tag: "Google",
            label: "Google搜尋",
        },
    ];

    fn get(&self, flag: Channel) -> bool {
        match flag {
            Channel::Facebook => self.facebook,
            Channel::Instagram => self.ig,
            Channel::Website => self.website,
            Channel::FriendReferral => self.friend_refer,
            Channel::Google => self.google,
        }
    }

    fn set(&mut self, flag: Channel, value: bool) {
        match flag {
            Channel::Facebook => self.facebook = value,
            Channel::Instagram => self.ig = value,
            Channel::Website => self.website = value,
            Channel::FriendReferral => self.friend_refer = value,
            Channel::Google => self.google = value,
        }
    }
}

/// Conditions asked about in the family-history section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    Cardiovascular,
    Metabolic,
    Cancer,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyHistory {
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub cardiovascular: bool,
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub metabolic: bool,
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub cancer: bool,
    #[serde(deserialize_with = "crate::lenient::flag")]
    pub other: bool,
}

impl FlagGroup for FamilyHistory {
    type Flag = Condition;

    const SPECS: &'static [FlagSpec<Condition>] = &[
        FlagSpec {
            flag: Condition::Cardiovascular,
            tag: "心血管疾病",
            label: "中風、心肌梗塞等心血管疾病",
        },
        FlagSpec {
            flag: Condition::Metabolic,
            tag: "代謝疾病",
            label: "高血壓、糖尿病、高血脂等代謝疾病",
        },
        FlagSpec {
            flag: Condition::Cancer,
            tag: "癌症",
            label: "癌症等惡性疾病",
        },
        FlagSpec {
            flag: Condition::Other,
            tag: "其他",
            label: "其他（自體免疫疾病、重大傷病等）",
        },
    ];

    fn get(&self, flag: Condition) -> bool {
        match flag {
            Condition::Cardiovascular => self.cardiovascular,
            Condition::Metabolic => self.metabolic,
            Condition::Cancer => self.cancer,
            Condition::Other => self.other,
        }
    }

    fn set(&mut self, flag: Condition, value: bool) {
        match flag {
            Condition::Cardiovascular => self.cardiovascular = value,
            Condition::Metabolic => self.metabolic = value,
            Condition::Cancer => self.cancer = value,
            Condition::Other => self.other = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_channel_tags_flatten() {
        let channels = SourceChannels::from_tags(&["FB", "診所網站"]);
        assert_eq!(
            channels,
            SourceChannels {
                facebook: true,
                ig: false,
                website: true,
                friend_refer: false,
                google: false,
            }
        );
    }

    #[test]
    fn test_unknown_tags_ignored() {
        let channels = SourceChannels::from_tags(&["TikTok", "Google", ""]);
        assert!(channels.google);
        assert_eq!(channels.checked_labels(), vec!["Google搜尋"]);
    }

    #[test]
    fn test_empty_selection_sets_nothing() {
        let history = FamilyHistory::from_tags::<&str>(&[]);
        assert!(!history.any());
        assert!(history.checked_labels().is_empty());
    }

    #[test]
    fn test_checked_labels_follow_table_order() {
        let history = FamilyHistory::from_tags(&["其他", "心血管疾病"]);
        assert_eq!(
            history.checked_labels(),
            vec![
                "中風、心肌梗塞等心血管疾病",
                "其他（自體免疫疾病、重大傷病等）"
            ]
        );
    }

    #[test]
    fn test_line_alias_maps_to_ig() {
        let channels: SourceChannels =
            serde_json::from_str(r#"{"facebook":false,"line":true}"#).unwrap();
        assert!(channels.ig);
        assert!(!channels.google);
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(SourceChannels {
            friend_refer: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["friendRefer"], true);
        assert_eq!(json["ig"], false);
    }

    fn condition() -> impl Strategy<Value = Condition> {
        prop_oneof![
            Just(Condition::Cardiovascular),
            Just(Condition::Metabolic),
            Just(Condition::Cancer),
            Just(Condition::Other),
        ]
    }

    proptest! {
        /// Setting one flag never changes another
        #[test]
        fn flags_are_independent(target in condition(), start in any::<[bool; 4]>()) {
            let mut history = FamilyHistory {
                cardiovascular: start[0],
                metabolic: start[1],
                cancer: start[2],
                other: start[3],
            };
            let before = history;
            history.set(target, true);

            for spec in FamilyHistory::SPECS {
                if spec.flag == target {
                    prop_assert!(history.get(spec.flag));
                } else {
                    prop_assert_eq!(history.get(spec.flag), before.get(spec.flag));
                }
            }
        }
    }
}
