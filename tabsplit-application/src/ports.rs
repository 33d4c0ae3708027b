use crate::{error::ClassificationError, model::CategorySuggestion};
use std::collections::HashMap;
use tabsplit_domain::{Member, MemberId};

/// Suggests a category for an expense from its free-text fields.
pub trait ExpenseClassifier: Send + Sync {
    fn classify(
        &self,
        title: &str,
        description: &str,
    ) -> Result<CategorySuggestion, ClassificationError>;
}

pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, member_id: &MemberId) -> Option<&str>;
}

impl MemberDirectory for HashMap<MemberId, String> {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.get(member_id).map(String::as_str)
    }
}

impl MemberDirectory for [Member] {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.iter()
            .find(|member| &member.id == member_id)
            .and_then(|member| member.display_name.as_deref())
    }
}

impl MemberDirectory for Vec<Member> {
    fn display_name(&self, member_id: &MemberId) -> Option<&str> {
        self.as_slice().display_name(member_id)
    }
}
