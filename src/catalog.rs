use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use crate::dataset::Item;

/// Which slice of the catalog a session drills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    /// The 33 letters of the modern alphabet.
    Letters,
    /// Words followed by phrases.
    Words,
}

// (id, georgian, russian, pronunciation note)
const LETTERS: &[(&str, &str, &str, Option<&str>)] = &[
    ("l1", "ა", "а", None),
    ("l2", "ბ", "б", None),
    ("l3", "გ", "г", None),
    ("l4", "დ", "д", None),
    ("l5", "ე", "э", None),
    ("l6", "ვ", "в", None),
    ("l7", "ზ", "з", None),
    ("l8", "თ", "тх", Some("С придыханием")),
    ("l9", "ი", "и", None),
    ("l10", "კ", "к", Some("Резкое, без выдоха")),
    ("l11", "ლ", "л", None),
    ("l12", "მ", "м", None),
    ("l13", "ნ", "н", None),
    ("l14", "ო", "о", None),
    ("l15", "პ", "п", Some("Лёгкое, на выдохе")),
    ("l16", "ჟ", "ж", None),
    ("l17", "რ", "р", None),
    ("l18", "ს", "с", None),
    ("l19", "ტ", "т", None),
    ("l20", "უ", "у", None),
    ("l21", "ფ", "пф", None),
    ("l22", "ქ", "кх", Some("Лёгкое, на выдохе")),
    ("l23", "ღ", "гх", None),
    ("l24", "ყ", "кх!", Some("Глубокое, без выдоха")),
    ("l25", "შ", "ш", Some("Мягкое")),
    ("l26", "ჩ", "ч", None),
    ("l27", "ც", "ц", None),
    ("l28", "ძ", "дз", None),
    ("l29", "წ", "ц!", Some("Резкое, без выдоха")),
    ("l30", "ჭ", "ч!", Some("Резкое, без выдоха")),
    ("l31", "ხ", "х", Some("Глубокое")),
    ("l32", "ჯ", "дж", Some("Совмещённое")),
    ("l33", "ჰ", "хх", Some("Лёгкое, на выдохе")),
];

// (id, georgian, russian, transliteration)
const WORDS: &[(&str, &str, &str, &str)] = &[
    ("w1", "მამა", "отец", "мама"),
    ("w2", "დედა", "мать", "дэда"),
    ("w3", "სახლი", "дом", "сахли"),
    ("w4", "წიგნი", "книга", "цигни"),
    ("w5", "ქალაქი", "город", "калаки"),
    ("w6", "მთა", "гора", "мта"),
    ("w7", "წყალი", "вода", "цкали"),
    ("w8", "ძმა", "брат", "дзма"),
    ("w9", "და", "сестра", "да"),
    ("w10", "ბავშვი", "ребенок", "бавшви"),
    ("w11", "კაცი", "мужчина", "каци"),
    ("w12", "ქალი", "женщина", "кали"),
    ("w13", "ძაღლი", "собака", "дзагли"),
    ("w14", "კატა", "кошка", "ката"),
    ("w15", "ხე", "дерево", "хэ"),
    ("w16", "მზე", "солнце", "мзэ"),
    ("w17", "ღამე", "ночь", "гамэ"),
    ("w18", "დღე", "день", "дгэ"),
    ("w19", "პური", "хлеб", "пури"),
    ("w20", "ღვინო", "вино", "гвино"),
    ("w21", "გზა", "дорога", "гза"),
    ("w22", "ენა", "язык", "эна"),
    ("w23", "სიყვარული", "любовь", "сикварули"),
    ("w24", "მეგობარი", "друг", "мэгобари"),
    ("w25", "კარგი", "хороший", "карги"),
    ("w26", "ცუდი", "плохой", "цуди"),
    ("w27", "დიდი", "большой", "диди"),
    ("w28", "პატარა", "маленький", "патара"),
    ("w29", "ახალი", "новый", "ахали"),
    ("w30", "ლამაზი", "красивый", "ламази"),
];

// (id, georgian, russian)
const PHRASES: &[(&str, &str, &str)] = &[
    ("p1", "ეს ჩემი სახლია.", "Это мой дом."),
    ("p2", "რა გქვია?", "Как тебя зовут?"),
    ("p3", "სად არის შენი წიგნი?", "Где твоя книга?"),
    ("p4", "მე შენ მიყვარხარ.", "Я тебя люблю."),
    ("p5", "ეს შენი წიგნია?", "Это твоя книга?"),
    ("p6", "ის მათი მეგობარია.", "Он их друг."),
    ("p7", "სად არის თქვენი მანქანა?", "Где ваша машина?"),
    ("p8", "ეს ჩვენი სკოლაა.", "Это наша школа."),
    ("p9", "გიორგი, სად მიდიხარ?", "Георгий, куда ты идёшь?"),
    ("p10", "სად არის რესტორანი ბაგრატონი?", "Где ресторан «Багратони»?"),
    ("p11", "უკაცრავად, სად არის რუსთაველის ქუჩა?", "Извините, где улица Руставели?"),
    ("p12", "ნანა, როდის მიდიხარ სამსახურზე?", "Нана, когда ты идёшь на работу?"),
    ("p13", "ლიკა, როდის მიდიხარ ნანასთან?", "Лика, когда ты идёшь к Нане?"),
    ("p14", "მე მივდივარ ბაზარში ტაქსით.", "Я еду на рынок на такси."),
    ("p15", "ჩემი დაქალი მიდის პარკში ფეხით.", "Моя подруга идёт в парк пешком."),
    ("p16", "შენ სახლში მანქანით მიდიხარ თუ ფეხით?", "Ты домой едешь на машине или идёшь пешком?"),
    ("p17", "ჩემი მეგობარი სამსახურში ფეხით მიდის.", "Мой друг идёт на работу пешком."),
    ("p18", "ჩემი შვილი სკოლაში ავტობუსით მიდის.", "Мой ребёнок едет в школу на автобусе."),
    ("p19", "ჩემი გოგო სახლში ფეხით მოდის.", "Моя дочь приходит домой пешком."),
    ("p20", "მე სახლში ფეხით მოვდივარ.", "Я домой прихожу пешком."),
    ("p21", "მე მივდივარ ბაზარში", "Я иду на рынок."),
    ("p22", "შენ მიდიხარ სახლში", "Ты идёшь домой."),
    ("p23", "ის მიდის ბათუმში", "Он идёт в Батуми."),
    ("p24", "ჩვენ მივდივართ თბილისში", "Мы идём в Тбилиси."),
    ("p25", "თქვენ მიდიხართ ქუთაისში", "Вы идёте в Кутаиси."),
    ("p26", "ისინი მიდიან ქობულეთში", "Они идут в Кобулети."),
];

// Short words used by letter-mode assembly and transliteration questions.
const PRACTICE_WORDS: &[(&str, &str, &str, &str)] = &[
    ("sw1", "მამა", "отец", "мама"),
    ("sw2", "დედა", "мать", "дэда"),
    ("sw3", "კატა", "кошка", "ката"),
    ("sw4", "სახლი", "дом", "сахли"),
    ("sw5", "წიგნი", "книга", "цигни"),
    ("sw6", "ვარ", "есть (я)", "вар"),
    ("sw7", "და", "и / сестра", "да"),
    ("sw8", "არის", "есть (он/она)", "арис"),
    ("sw9", "კარგი", "хороший", "карги"),
    ("sw10", "დიდი", "большой", "диди"),
];

/// Read-only item store. Built once; sessions take copies of the slices they drill.
#[derive(Debug, Clone)]
pub struct Catalog {
    letters: Vec<Item>,
    words: Vec<Item>,
    phrases: Vec<Item>,
    practice_words: Vec<Item>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::georgian()
    }
}

impl Catalog {
    /// The built-in Georgian/Russian dataset.
    pub fn georgian() -> Self {
        Self {
            letters: LETTERS
                .iter()
                .map(|&(id, geo, rus, note)| Item::letter(id, geo, rus, note))
                .collect(),
            words: WORDS
                .iter()
                .map(|&(id, geo, rus, translit)| Item::word(id, geo, rus, translit))
                .collect(),
            phrases: PHRASES
                .iter()
                .map(|&(id, geo, rus)| Item::phrase(id, geo, rus))
                .collect(),
            practice_words: PRACTICE_WORDS
                .iter()
                .map(|&(id, geo, rus, translit)| Item::word(id, geo, rus, translit))
                .collect(),
        }
    }

    pub fn new(
        letters: Vec<Item>,
        words: Vec<Item>,
        phrases: Vec<Item>,
        practice_words: Vec<Item>,
    ) -> Self {
        Self {
            letters,
            words,
            phrases,
            practice_words,
        }
    }

    pub fn list_items(&self, category: Category) -> Vec<Item> {
        match category {
            Category::Letters => self.letters.clone(),
            Category::Words => self.words.iter().chain(&self.phrases).cloned().collect(),
        }
    }

    pub fn letters(&self) -> &[Item] {
        &self.letters
    }

    pub fn practice_words(&self) -> &[Item] {
        &self.practice_words
    }
}
