//! Static keyword tables.
//!
//! Scoring code never names a keyword; it only walks a [`KeywordTable`].
//! The built-in tables below can be replaced or extended at runtime, or
//! deserialized from a JSON data file.

use serde::{Deserialize, Serialize};

/// Bilingual keywords per topic code, appended to the mapping-table
/// description when seeding the topic-code dictionary.
pub const TOPIC_CODE_KEYWORDS: &[(&str, &[&str])] = &[
    ("prob", &["probability", "prob", "chance", "random", "概率", "随机", "可能性"]),
    ("geom", &["geometry", "geometric", "triangle", "circle", "area", "几何", "图形", "面积"]),
    ("div", &["divisibility", "divisible", "factor", "multiple", "整除", "整除性", "倍数"]),
    ("mod", &["modular", "modulo", "remainder", "congruent", "模", "模运算", "同余"]),
    ("factor", &["factor", "divisor", "prime", "composite", "因数", "因子", "质数", "合数"]),
    ("count", &["counting", "combinatorics", "permutation", "combination", "计数", "排列", "组合"]),
    ("area", &["area", "surface", "square", "rectangle", "面积", "表面积"]),
    ("sim", &["similar", "similarity", "proportion", "ratio", "相似", "比例"]),
    ("complex", &["complex", "imaginary", "real", "plane", "复数", "虚数"]),
    ("trig", &["trigonometry", "sine", "cosine", "tangent", "三角", "三角函数"]),
    ("function", &["function", "functional", "equation", "函数", "方程"]),
    ("log", &["logarithm", "log", "exponential", "对数", "指数"]),
    ("exp", &["exponent", "exponential", "power", "指数", "幂"]),
    ("equation", &["equation", "inequality", "solve", "solution", "方程", "不等式", "解"]),
    ("poly", &["polynomial", "degree", "coefficient", "多项式", "次数"]),
    ("seq", &["sequence", "series", "arithmetic", "geometric", "数列", "级数"]),
    ("stats", &["statistics", "stat", "data", "distribution", "统计", "数据"]),
    ("circle", &["circle", "circumference", "radius", "diameter", "圆", "圆周", "半径"]),
    ("angle", &["angle", "degree", "radian", "trigonometry", "角", "角度"]),
    ("coor", &["coordinate", "coordinate geometry", "graph", "坐标", "坐标系"]),
    ("length", &["length", "distance", "perimeter", "长度", "距离", "周长"]),
    ("3d", &["3d", "three dimensional", "volume", "solid", "三维", "体积"]),
    ("base", &["base", "representation", "number system", "进制", "表示"]),
    ("lcm", &["lcm", "least common multiple", "multiple", "最小公倍数"]),
    ("digit", &["digit", "number", "representation", "数字", "数位"]),
    ("Markov", &["markov", "chain", "probability", "state", "马尔可夫", "链"]),
    ("Recursion", &["recursion", "recursive", "recurrence", "递归", "递推"]),
    ("logic", &["logic", "logical", "boolean", "逻辑", "布尔"]),
    ("uniform", &["uniform", "distribution", "probability", "均匀", "分布"]),
    ("game", &["game", "strategy", "winning", "游戏", "策略"]),
    ("Expectation", &["expectation", "expected value", "mean", "期望", "期望值"]),
];

/// Chinese concept → English keywords looked up in question text.
pub const CONCEPT_EXPANSIONS: &[(&str, &[&str])] = &[
    // probability and statistics
    ("概率", &["probability", "prob", "chance", "random", "likely", "unlikely", "odds"]),
    ("统计", &["statistics", "stat", "data", "distribution", "mean", "median", "mode"]),
    // geometry
    ("几何", &["geometry", "geometric", "triangle", "circle", "area", "perimeter", "volume"]),
    ("三角形", &["triangle", "trigonometric", "sine", "cosine", "tangent"]),
    ("圆", &["circle", "circumference", "radius", "diameter", "arc"]),
    ("面积", &["area", "surface", "square", "rectangle"]),
    ("周长", &["perimeter", "circumference", "boundary"]),
    ("相似", &["similar", "similarity", "proportion", "ratio"]),
    ("全等", &["congruent", "congruence", "equal", "identical"]),
    // algebra
    ("代数", &["algebra", "equation", "polynomial", "solve", "factor", "expression"]),
    ("函数", &["function", "graph", "domain", "range", "f(x)", "y="]),
    ("方程", &["equation", "solve", "solution", "root", "zero"]),
    ("多项式", &["polynomial", "degree", "coefficient", "term"]),
    // number theory
    ("数论", &["number theory", "divisibility", "prime", "factor", "modulo"]),
    ("整除", &["divisible", "divisibility", "factor", "multiple", "divide"]),
    ("模运算", &["modulo", "mod", "remainder", "congruent", "modular"]),
    ("因数", &["factor", "divisor", "multiple", "prime"]),
    ("质数", &["prime", "prime number", "composite"]),
    // counting
    ("计数", &["count", "counting", "arrangement", "combination"]),
    ("组合", &["combination", "combinatorics", "permutation", "arrangement"]),
    ("排列", &["permutation", "arrangement", "order"]),
    // misc
    ("集合", &["set", "element", "subset", "union", "intersection"]),
    ("逻辑", &["logic", "logical", "if", "then", "and", "or"]),
    ("不等式", &["inequality", "greater than", "less than", "≥", "≤"]),
    ("绝对值", &["absolute value", "|x|", "magnitude"]),
    ("分数", &["fraction", "numerator", "denominator", "ratio"]),
    ("小数", &["decimal", "decimal point", "tenth", "hundredth"]),
    ("百分比", &["percent", "percentage", "%", "hundredth"]),
];

/// Coarser concept table used by the tagger when a label matches nothing
/// directly.
pub const TAGGER_FALLBACK: &[(&str, &[&str])] = &[
    ("概率", &["probability", "prob", "chance", "random"]),
    ("统计", &["statistics", "stat", "data", "distribution"]),
    ("组合", &["combination", "combinatorics", "permutation"]),
    ("几何", &["geometry", "geometric", "triangle", "circle"]),
    ("代数", &["algebra", "equation", "polynomial"]),
    ("数论", &["number theory", "divisibility", "prime"]),
    ("函数", &["function", "graph", "domain", "range"]),
];

/// Topic keyword → the division letter it conventionally belongs to.
pub const TOPIC_DIVISIONS: &[(&str, &str)] = &[
    ("prob", "c"),
    ("geom", "g"),
    ("div", "s"),
    ("mod", "s"),
    ("factor", "s"),
    ("count", "c"),
    ("combinatorics", "c"),
    ("algebra", "a"),
    ("function", "a"),
    ("equation", "a"),
    ("triangle", "g"),
    ("circle", "g"),
    ("area", "g"),
    ("perimeter", "g"),
    ("similar", "g"),
    ("congruent", "g"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordFamily {
    pub key: String,
    pub keywords: Vec<String>,
}

/// Ordered `key → keywords` table. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordTable {
    families: Vec<KeywordFamily>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_static(table: &[(&str, &[&str])]) -> Self {
        let mut out = Self::new();
        for (key, keywords) in table {
            out.insert(*key, keywords.iter().map(|k| k.to_string()).collect());
        }
        out
    }

    pub fn concept_expansions() -> Self {
        Self::from_static(CONCEPT_EXPANSIONS)
    }

    pub fn tagger_fallback() -> Self {
        Self::from_static(TAGGER_FALLBACK)
    }

    /// Insert or replace a family. A replaced family keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, keywords: Vec<String>) {
        let key = key.into();
        match self.families.iter_mut().find(|f| f.key == key) {
            Some(family) => family.keywords = keywords,
            None => self.families.push(KeywordFamily { key, keywords }),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.families
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.keywords.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeywordFamily> {
        self.families.iter()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Keywords of every family whose key occurs in `text`, in table order.
    /// A keyword shared by two matching families is yielded twice.
    pub fn expand<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.families
            .iter()
            .filter(move |f| text.contains(f.key.as_str()))
            .flat_map(|f| f.keywords.iter().map(String::as_str))
    }
}

/// Static bilingual keywords for `code`, if the code is known.
pub fn static_keywords_for(code: &str) -> Option<&'static [&'static str]> {
    TOPIC_CODE_KEYWORDS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, keywords)| *keywords)
}
