//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Arguments
/// * `node` - XML node
///
/// # Returns
/// Tag name without namespace (e.g., "ARTICLE" not "{ns}ARTICLE")
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use eurlex_harvester::xml::get_tag_name;
///
/// let xml = r#"<ACT><ARTICLE>text</ARTICLE></ACT>"#;
/// let doc = Document::parse(xml).unwrap();
/// let article = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(article), "ARTICLE");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// First matching child element, or `None` if not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use eurlex_harvester::xml::find_child;
///
/// let xml = r#"<NP><NO.P>(1)</NO.P><TXT>text</TXT></NP>"#;
/// let doc = Document::parse(xml).unwrap();
/// let np = doc.root_element();
///
/// assert!(find_child(np, "NO.P").is_some());
/// assert!(find_child(np, "LIST").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name.
///
/// # Arguments
/// * `node` - Parent node to search in
/// * `tag` - Tag name to search for
///
/// # Returns
/// Iterator over matching child elements
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use eurlex_harvester::xml::find_children;
///
/// let xml = r#"<LIST><ITEM>1</ITEM><ITEM>2</ITEM><OTHER/></LIST>"#;
/// let doc = Document::parse(xml).unwrap();
/// let list = doc.root_element();
///
/// let items: Vec<_> = find_children(list, "ITEM").collect();
/// assert_eq!(items.len(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Find a descendant element matching a path of tag names.
///
/// # Arguments
/// * `node` - Starting node
/// * `path` - Slash-separated path of tag names (e.g., "TITLE/TI")
///
/// # Returns
/// Matching element, or `None` if path not found
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use eurlex_harvester::xml::find_by_path;
///
/// let xml = r#"<ANNEX><TITLE><TI><P>ANNEX I</P></TI></TITLE></ANNEX>"#;
/// let doc = Document::parse(xml).unwrap();
/// let annex = doc.root_element();
///
/// let ti = find_by_path(annex, "TITLE/TI");
/// assert!(ti.is_some());
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let parts: Vec<&str> = path.split('/').collect();
    let mut current = node;

    for part in parts {
        current = find_child(current, part)?;
    }

    Some(current)
}

/// Get all element children of a node.
///
/// # Arguments
/// * `node` - Parent node
///
/// # Returns
/// Iterator over element children (excludes text nodes, comments, etc.)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name() {
        let xml = r#"<ACT><ARTICLE/></ACT>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "ACT");
    }

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:ACT xmlns:ns="http://example.com"><ns:ARTICLE/></ns:ACT>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "ACT");
    }

    #[test]
    fn test_find_child() {
        let xml = r#"<ARTICLE><TI.ART/><STI.ART/><PARAG/></ARTICLE>"#;
        let doc = Document::parse(xml).unwrap();
        let article = doc.root_element();

        assert!(find_child(article, "TI.ART").is_some());
        assert!(find_child(article, "STI.ART").is_some());
        assert!(find_child(article, "ANNEX").is_none());
    }

    #[test]
    fn test_find_children() {
        let xml = r#"<LIST><ITEM>1</ITEM><OTHER/><ITEM>2</ITEM></LIST>"#;
        let doc = Document::parse(xml).unwrap();
        let list = doc.root_element();

        let items: Vec<_> = find_children(list, "ITEM").collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_find_by_path() {
        let xml = r#"<ACT><TITLE><TI><P>found</P></TI></TITLE></ACT>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        let p = find_by_path(root, "TITLE/TI/P");
        assert!(p.is_some());
        assert_eq!(p.unwrap().text(), Some("found"));

        assert!(find_by_path(root, "MISSING/PATH").is_none());
    }

    #[test]
    fn test_element_children() {
        let xml = r#"<NP>text<NO.P/>more<TXT/></NP>"#;
        let doc = Document::parse(xml).unwrap();
        let np = doc.root_element();

        let children: Vec<_> = element_children(np).collect();
        assert_eq!(children.len(), 2);
    }
}
