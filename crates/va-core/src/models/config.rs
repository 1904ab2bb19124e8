use serde::Deserialize;

/// Header names used to find each field in the input sheets and to label the
/// output roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub name: String,
    pub student_id: String,
    pub sex: String,
    pub contact: String,
    /// Free-text column of the sign-up sheet holding the chosen windows.
    pub selections: String,
    /// Admitted window column of a roster.
    pub window: String,
    pub sequence: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "姓名".into(),
            student_id: "学号".into(),
            sex: "性别".into(),
            contact: "联系方式".into(),
            selections: "所选时间".into(),
            window: "被录取时间段".into(),
            sequence: "报名时间".into(),
        }
    }
}

impl ColumnNames {
    /// Output header row, in roster column order.
    pub fn roster_headers(&self) -> [&str; 6] {
        [
            &self.name,
            &self.student_id,
            &self.sex,
            &self.contact,
            &self.window,
            &self.sequence,
        ]
    }

    pub(crate) fn all(&self) -> [(&'static str, &str); 7] {
        [
            ("name", &self.name),
            ("student_id", &self.student_id),
            ("sex", &self.sex),
            ("contact", &self.contact),
            ("selections", &self.selections),
            ("window", &self.window),
            ("sequence", &self.sequence),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    pub columns: ColumnNames,
    pub default_capacity: u32,
    pub output_file: String,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            default_capacity: 5,
            output_file: "录取结果.xlsx".into(),
        }
    }
}
