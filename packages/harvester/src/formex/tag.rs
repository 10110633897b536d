//! Formex element identities.

use roxmltree::Node;

use crate::xml::get_tag_name;

/// Identity of a Formex element, resolved from its tag name.
///
/// The grammar carries a long tail of wrapper elements; anything not
/// explicitly known resolves to [`Tag::Other`] and is processed
/// generically, so unrecognized wrappers never drop content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `<TITLE>` document title container.
    Title,
    /// `<TI>` title body.
    Ti,
    /// `<TI.ART>` article number line ("Article 49").
    TiArt,
    /// `<STI.ART>` article subtitle ("Review").
    StiArt,
    /// `<ARTICLE>` article container.
    Article,
    /// `<PARAG>` numbered paragraph container.
    Parag,
    /// `<NO.PARAG>` paragraph number.
    NoParag,
    /// `<ALINEA>` paragraph body.
    Alinea,
    /// `<P>` plain paragraph.
    P,
    /// `<LIST>` enumeration container.
    List,
    /// `<ITEM>` enumeration item.
    Item,
    /// `<NP>` numbered-point wrapper inside an item.
    Np,
    /// `<NO.P>` item numbering marker.
    NoP,
    /// `<TXT>` item body text.
    Txt,
    /// `<QUOT.S>` quoted section (replacement content in amendments).
    QuotS,
    /// `<QUOT.E>` quoted section end marker.
    QuotE,
    /// `<QUOT.START>` inline opening quotation mark.
    QuotStart,
    /// `<QUOT.END>` inline closing quotation mark.
    QuotEnd,
    /// `<DATE>` date wrapper.
    Date,
    /// `<NOTE>` footnote.
    Note,
    /// `<REF.DOC.OJ>` Official Journal reference.
    RefDocOj,
    /// `<HT>` highlighted (formatted) text.
    Ht,
    /// `<FT>` formatted number/token.
    Ft,
    /// `<PREAMBLE>` preamble container.
    Preamble,
    /// `<PREAMBLE.INIT>` institutional opening formula.
    PreambleInit,
    /// `<PREAMBLE.FINAL>` adoption formula.
    PreambleFinal,
    /// `<GR.VISA>` "having regard" group.
    GrVisa,
    /// `<VISA>` single "having regard" clause.
    Visa,
    /// `<GR.CONSID>` recitals group.
    GrConsid,
    /// `<CONSID>` single recital.
    Consid,
    /// `<ENACTING.TERMS>` enacting terms container.
    EnactingTerms,
    /// `<ANNEX>` annex container.
    Annex,
    /// `<TI.ANNEX>` annex title.
    TiAnnex,
    /// `<FINAL>` signature/closing block.
    Final,
    /// `<DIVISION>` generic structural division (annexes, quoted content).
    Division,
    /// Any element without an explicit handler.
    Other,
}

impl Tag {
    /// Resolve a tag name to its identity.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "TITLE" => Self::Title,
            "TI" => Self::Ti,
            "TI.ART" => Self::TiArt,
            "STI.ART" => Self::StiArt,
            "ARTICLE" => Self::Article,
            "PARAG" => Self::Parag,
            "NO.PARAG" => Self::NoParag,
            "ALINEA" => Self::Alinea,
            "P" => Self::P,
            "LIST" => Self::List,
            "ITEM" => Self::Item,
            "NP" => Self::Np,
            "NO.P" => Self::NoP,
            "TXT" => Self::Txt,
            "QUOT.S" => Self::QuotS,
            "QUOT.E" => Self::QuotE,
            "QUOT.START" => Self::QuotStart,
            "QUOT.END" => Self::QuotEnd,
            "DATE" => Self::Date,
            "NOTE" => Self::Note,
            "REF.DOC.OJ" => Self::RefDocOj,
            "HT" => Self::Ht,
            "FT" => Self::Ft,
            "PREAMBLE" => Self::Preamble,
            "PREAMBLE.INIT" => Self::PreambleInit,
            "PREAMBLE.FINAL" => Self::PreambleFinal,
            "GR.VISA" => Self::GrVisa,
            "VISA" => Self::Visa,
            "GR.CONSID" => Self::GrConsid,
            "CONSID" => Self::Consid,
            "ENACTING.TERMS" => Self::EnactingTerms,
            "ANNEX" => Self::Annex,
            "TI.ANNEX" => Self::TiAnnex,
            "FINAL" => Self::Final,
            "DIVISION" => Self::Division,
            _ => Self::Other,
        }
    }

    /// Resolve the identity of an element node.
    #[must_use]
    pub fn of(node: Node<'_, '_>) -> Self {
        Self::from_name(get_tag_name(node))
    }
}
