//! Polish name and place tables for synthetic patients.

pub(crate) const MALE_FIRST_NAMES: &[&str] = &[
    "Jan", "Piotr", "Krzysztof", "Andrzej", "Tomasz", "Paweł", "Marcin", "Michał", "Marek",
    "Grzegorz", "Józef", "Łukasz", "Adam", "Zbigniew", "Jerzy", "Tadeusz", "Mateusz", "Dariusz",
    "Mariusz", "Wojciech", "Ryszard", "Jakub", "Henryk", "Robert", "Kazimierz", "Jacek",
    "Maciej", "Kamil", "Janusz", "Stanisław", "Szymon", "Bartłomiej", "Przemysław", "Mikołaj",
];

pub(crate) const FEMALE_FIRST_NAMES: &[&str] = &[
    "Anna", "Maria", "Katarzyna", "Małgorzata", "Agnieszka", "Barbara", "Ewa", "Krystyna",
    "Elżbieta", "Magdalena", "Joanna", "Zofia", "Janina", "Monika", "Teresa", "Danuta",
    "Natalia", "Karolina", "Marta", "Beata", "Dorota", "Halina", "Jadwiga", "Aleksandra",
    "Irena", "Grażyna", "Julia", "Bożena", "Urszula", "Iwona", "Weronika", "Łucja",
];

/// Surnames as (masculine, feminine) pairs.
pub(crate) const LAST_NAMES: &[(&str, &str)] = &[
    ("Nowak", "Nowak"),
    ("Kowalski", "Kowalska"),
    ("Wiśniewski", "Wiśniewska"),
    ("Wójcik", "Wójcik"),
    ("Kowalczyk", "Kowalczyk"),
    ("Kamiński", "Kamińska"),
    ("Lewandowski", "Lewandowska"),
    ("Zieliński", "Zielińska"),
    ("Szymański", "Szymańska"),
    ("Woźniak", "Woźniak"),
    ("Dąbrowski", "Dąbrowska"),
    ("Kozłowski", "Kozłowska"),
    ("Jankowski", "Jankowska"),
    ("Mazur", "Mazur"),
    ("Kwiatkowski", "Kwiatkowska"),
    ("Krawczyk", "Krawczyk"),
    ("Piotrowski", "Piotrowska"),
    ("Grabowski", "Grabowska"),
    ("Nowakowski", "Nowakowska"),
    ("Pawłowski", "Pawłowska"),
    ("Michalski", "Michalska"),
    ("Król", "Król"),
    ("Wieczorek", "Wieczorek"),
    ("Jabłoński", "Jabłońska"),
    ("Wróbel", "Wróbel"),
    ("Nowicki", "Nowicka"),
    ("Majewski", "Majewska"),
    ("Olszewski", "Olszewska"),
    ("Stępień", "Stępień"),
    ("Jaworski", "Jaworska"),
    ("Malinowski", "Malinowska"),
    ("Adamczyk", "Adamczyk"),
    ("Dudek", "Dudek"),
    ("Górski", "Górska"),
    ("Sikora", "Sikora"),
    ("Walczak", "Walczak"),
];

/// Cities with the leading digits of their postal codes.
pub(crate) const CITIES: &[(&str, &str)] = &[
    ("Warszawa", "0"),
    ("Kraków", "3"),
    ("Łódź", "9"),
    ("Wrocław", "5"),
    ("Poznań", "6"),
    ("Gdańsk", "8"),
    ("Szczecin", "7"),
    ("Bydgoszcz", "8"),
    ("Lublin", "2"),
    ("Białystok", "1"),
    ("Katowice", "4"),
    ("Gdynia", "8"),
    ("Częstochowa", "4"),
    ("Radom", "2"),
    ("Toruń", "8"),
    ("Rzeszów", "3"),
    ("Kielce", "2"),
    ("Olsztyn", "1"),
    ("Opole", "4"),
    ("Zielona Góra", "6"),
];

pub(crate) const STREETS: &[&str] = &[
    "Kwiatowa", "Polna", "Leśna", "Słoneczna", "Krótka", "Szkolna", "Ogrodowa", "Lipowa",
    "Łąkowa", "Brzozowa", "Kościelna", "Sienkiewicza", "Mickiewicza", "Kolejowa", "Parkowa",
    "Długa", "Jana Pawła II", "Piłsudskiego", "Kopernika", "Słowackiego", "Warszawska",
    "Zielona", "Akacjowa", "Różana",
];

pub(crate) const EMAIL_DOMAINS: &[&str] = &[
    "example.pl", "poczta.example.pl", "mail.example.com", "example.com",
];

/// Lowercases and strips Polish diacritics for use in email local parts.
pub(crate) fn ascii_fold(value: &str) -> String {
    value
        .chars()
        .filter_map(|c| {
            let folded = match c.to_lowercase().next().unwrap_or(c) {
                'ą' => 'a',
                'ć' => 'c',
                'ę' => 'e',
                'ł' => 'l',
                'ń' => 'n',
                'ó' => 'o',
                'ś' => 's',
                'ź' | 'ż' => 'z',
                other => other,
            };
            folded.is_ascii_alphanumeric().then_some(folded)
        })
        .collect()
}
