use std::collections::{BTreeMap, HashMap};

use docmodel::BaseModel;

#[derive(Debug)]
pub struct Author {
    #[serde(flatten)]
    pub base: BaseModel,
    pub name: String,

    #[serde(skip)]
    pub events: Vec<String>,
}

#[derive(Debug)]
pub struct Post {
    #[serde(flatten)]
    pub base: BaseModel,
    pub title: String,
    pub views: u32,
    pub author: Author,
    pub editor: Option<Author>,
    pub coauthors: Vec<Author>,
    pub reviewers: Vec<Option<Author>>,
    pub by_role: BTreeMap<String, Author>,
    pub shelves: HashMap<String, Vec<Author>>,
    pub drafts: Option<Vec<Author>>,
    pub translators: Option<HashMap<String, Author>>,
    pub stacks: Vec<Vec<Option<Author>>>,
    pub mentions: HashMap<String, Option<Author>>,
    pub meta: Meta,

    #[docmodel(skip)]
    pub sponsor: Option<Author>,
}

#[derive(Debug, Default)]
pub struct Meta {
    pub tags: Vec<String>,
}
